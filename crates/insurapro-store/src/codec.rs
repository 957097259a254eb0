//! Line format of the customers file.
//!
//! ```text
//! First Name,Last Name,Email,Phone,Customer ID,Interactions
//! Jane,Doe,jane@x.com,+12345678901,1,Type:Meeting,Date:01/02/2023|Type:Call,Date:03/02/2023
//! ```
//!
//! The first four fields are written verbatim with no escaping. Everything
//! after the id is the interaction list. A customer without interactions is
//! written with the single `Type:No Interaction,Date:N/A` entry, and that
//! entry decodes back to an empty list.

use insurapro_core::domain::{Customer, CustomerId, Interaction};
use thiserror::Error;

pub const HEADER: &str = "First Name,Last Name,Email,Phone,Customer ID,Interactions";

const FIELD_SEPARATOR: char = ',';
const INTERACTION_SEPARATOR: char = '|';
const TYPE_MARKER: &str = "Type:";
const DATE_MARKER: &str = ",Date:";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("invalid customer id: {0:?}")]
    InvalidCustomerId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based, counting the header.
    pub line: usize,
    pub raw: String,
    pub error: CodecError,
}

#[derive(Debug, Clone, Default)]
pub struct DecodedDocument {
    pub customers: Vec<Customer>,
    pub skipped: Vec<SkippedLine>,
}

pub fn encode_document(customers: &[Customer]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + customers.len() * 96);
    out.push_str(HEADER);
    out.push('\n');
    for customer in customers {
        out.push_str(&encode_customer(customer));
        out.push('\n');
    }
    out
}

/// Decodes a whole file. The first line is always treated as the header and
/// is not inspected; blank lines are ignored.
pub fn decode_document(contents: &str) -> DecodedDocument {
    let mut decoded = DecodedDocument::default();
    for (index, line) in contents.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match decode_customer(line) {
            Ok(customer) => decoded.customers.push(customer),
            Err(error) => decoded.skipped.push(SkippedLine {
                line: index + 1,
                raw: line.to_string(),
                error,
            }),
        }
    }
    decoded
}

pub fn encode_customer(customer: &Customer) -> String {
    format!(
        "{first},{last},{email},{phone},{id},{interactions}",
        first = customer.first_name,
        last = customer.last_name,
        email = customer.email,
        phone = customer.phone,
        id = customer.id,
        interactions = encode_interactions(&customer.interactions),
    )
}

pub fn encode_interactions(interactions: &[Interaction]) -> String {
    let entries: Vec<String> = interactions
        .iter()
        .filter(|interaction| !interaction.is_placeholder())
        .map(encode_interaction)
        .collect();
    if entries.is_empty() {
        return encode_interaction(&Interaction::placeholder());
    }
    entries.join(&INTERACTION_SEPARATOR.to_string())
}

fn encode_interaction(interaction: &Interaction) -> String {
    format!(
        "{TYPE_MARKER}{}{DATE_MARKER}{}",
        interaction.kind, interaction.date
    )
}

pub fn decode_customer(line: &str) -> Result<Customer, CodecError> {
    let mut fields = line.splitn(5, FIELD_SEPARATOR);
    let first_name = fields.next().ok_or(CodecError::MissingField("first name"))?;
    let last_name = fields.next().ok_or(CodecError::MissingField("last name"))?;
    let email = fields.next().ok_or(CodecError::MissingField("email"))?;
    let phone = fields.next().ok_or(CodecError::MissingField("phone"))?;
    let rest = fields.next().ok_or(CodecError::MissingField("customer id"))?;

    let (id, blob) = split_leading_id(rest)?;
    let blob = blob.trim_start_matches([FIELD_SEPARATOR, ' ']);

    Ok(Customer {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        interactions: decode_interactions(blob),
    })
}

/// Reads the integer at the start of `rest` (leading whitespace allowed) and
/// returns it together with whatever follows the digits.
fn split_leading_id(rest: &str) -> Result<(CustomerId, &str), CodecError> {
    let trimmed = rest.trim_start();
    let digits_end = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..digits_end];
    let id = digits
        .parse::<u32>()
        .map_err(|_| CodecError::InvalidCustomerId(field_preview(trimmed)))?;
    Ok((CustomerId(id), &trimmed[digits_end..]))
}

fn field_preview(rest: &str) -> String {
    rest.split(FIELD_SEPARATOR).next().unwrap_or_default().to_string()
}

/// Pieces without both markers are dropped, as are placeholder entries.
pub fn decode_interactions(blob: &str) -> Vec<Interaction> {
    blob.split(INTERACTION_SEPARATOR)
        .filter_map(decode_interaction)
        .filter(|interaction| !interaction.is_placeholder())
        .collect()
}

fn decode_interaction(piece: &str) -> Option<Interaction> {
    let type_start = piece.find(TYPE_MARKER)? + TYPE_MARKER.len();
    let after_type = &piece[type_start..];
    let date_marker = after_type.find(DATE_MARKER)?;
    let kind = &after_type[..date_marker];
    let date = &after_type[date_marker + DATE_MARKER.len()..];
    Some(Interaction::new(kind, date))
}

#[cfg(test)]
mod tests {
    use super::{
        decode_customer, decode_document, decode_interactions, encode_customer,
        encode_document, encode_interactions, CodecError, HEADER,
    };
    use insurapro_core::domain::{Customer, CustomerId, CustomerNew, Interaction};

    fn jane(interactions: Vec<Interaction>) -> Customer {
        let mut customer = Customer::from_new(
            CustomerId(1),
            CustomerNew {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@x.com".to_string(),
                phone: "+12345678901".to_string(),
            },
        );
        customer.interactions = interactions;
        customer
    }

    #[test]
    fn encode_without_interactions_writes_placeholder() {
        assert_eq!(
            encode_customer(&jane(Vec::new())),
            "Jane,Doe,jane@x.com,+12345678901,1,Type:No Interaction,Date:N/A"
        );
    }

    #[test]
    fn encode_suppresses_placeholder_next_to_real_entries() {
        let customer = jane(vec![
            Interaction::placeholder(),
            Interaction::new("Meeting", "01/02/2023"),
        ]);
        assert_eq!(
            encode_interactions(&customer.interactions),
            "Type:Meeting,Date:01/02/2023"
        );
    }

    #[test]
    fn encode_joins_entries_with_pipe() {
        let interactions = vec![
            Interaction::new("Meeting", "01/02/2023"),
            Interaction::new("Contract", "15/02/2023"),
        ];
        assert_eq!(
            encode_interactions(&interactions),
            "Type:Meeting,Date:01/02/2023|Type:Contract,Date:15/02/2023"
        );
    }

    #[test]
    fn decode_reads_fields_and_interactions() {
        let customer = decode_customer(
            "Jane,Doe,jane@x.com,+12345678901,7,Type:Meeting,Date:01/02/2023|Type:Call,Date:02/02/2023",
        )
        .expect("decode");
        assert_eq!(customer.id, CustomerId(7));
        assert_eq!(customer.first_name, "Jane");
        assert_eq!(customer.last_name, "Doe");
        assert_eq!(customer.email, "jane@x.com");
        assert_eq!(customer.phone, "+12345678901");
        assert_eq!(
            customer.interactions,
            vec![
                Interaction::new("Meeting", "01/02/2023"),
                Interaction::new("Call", "02/02/2023"),
            ]
        );
    }

    #[test]
    fn decode_placeholder_yields_empty_list() {
        let customer =
            decode_customer("Jane,Doe,jane@x.com,+12345678901,1,Type:No Interaction,Date:N/A")
                .expect("decode");
        assert!(customer.interactions.is_empty());
    }

    #[test]
    fn decode_trims_separators_before_interactions() {
        let customer = decode_customer("Jane,Doe,jane@x.com,1234567890, 3 , ,Type:Call,Date:x")
            .expect("decode");
        assert_eq!(customer.id, CustomerId(3));
        assert_eq!(customer.interactions, vec![Interaction::new("Call", "x")]);
    }

    #[test]
    fn decode_tolerates_missing_interaction_field() {
        let customer = decode_customer("Jane,Doe,jane@x.com,1234567890,4").expect("decode");
        assert_eq!(customer.id, CustomerId(4));
        assert!(customer.interactions.is_empty());
    }

    #[test]
    fn decode_drops_pieces_without_markers() {
        let interactions =
            decode_interactions("Type:Meeting,Date:01/02/2023|garbage|Date:only|Type:only");
        assert_eq!(
            interactions,
            vec![Interaction::new("Meeting", "01/02/2023")]
        );
    }

    #[test]
    fn decode_keeps_empty_kind_and_date() {
        assert_eq!(
            decode_interactions("Type:,Date:"),
            vec![Interaction::new("", "")]
        );
    }

    #[test]
    fn decode_rejects_bad_ids() {
        assert_eq!(
            decode_customer("Jane,Doe,jane@x.com,1234567890,abc,Type:Call,Date:x"),
            Err(CodecError::InvalidCustomerId("abc".to_string()))
        );
        assert!(matches!(
            decode_customer("Jane,Doe,jane@x.com,1234567890,-2,Type:Call,Date:x"),
            Err(CodecError::InvalidCustomerId(_))
        ));
        assert_eq!(
            decode_customer("Jane,Doe"),
            Err(CodecError::MissingField("email"))
        );
    }

    #[test]
    fn encode_decode_encode_is_a_fixed_point() {
        let original = jane(vec![
            Interaction::placeholder(),
            Interaction::new("Meeting", "01/02/2023"),
        ]);
        let first = encode_customer(&original);
        let decoded = decode_customer(&first).expect("decode");
        assert_eq!(
            decoded.interactions,
            vec![Interaction::new("Meeting", "01/02/2023")]
        );
        assert_eq!(encode_customer(&decoded), first);

        let empty = encode_customer(&jane(Vec::new()));
        let decoded = decode_customer(&empty).expect("decode");
        assert_eq!(encode_customer(&decoded), empty);
    }

    #[test]
    fn document_skips_header_blank_and_malformed_lines() {
        let contents = format!(
            "{HEADER}\nJane,Doe,jane@x.com,1234567890,2,Type:Call,Date:x\n\nbroken line\nJohn,Roe,john@x.com,1234567890,5,Type:No Interaction,Date:N/A\n"
        );
        let decoded = decode_document(&contents);
        let ids: Vec<CustomerId> = decoded.customers.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CustomerId(2), CustomerId(5)]);
        assert_eq!(decoded.skipped.len(), 1);
        assert_eq!(decoded.skipped[0].line, 4);
        assert_eq!(decoded.skipped[0].raw, "broken line");
    }

    #[test]
    fn document_ignores_header_contents() {
        let decoded = decode_document("whatever\nJane,Doe,j@x.com,1234567890,1,Type:a,Date:b\n");
        assert_eq!(decoded.customers.len(), 1);
    }

    #[test]
    fn document_starts_with_header() {
        let encoded = encode_document(&[jane(Vec::new())]);
        let mut lines = encoded.lines();
        assert_eq!(lines.next(), Some(HEADER));
        assert_eq!(
            lines.next(),
            Some("Jane,Doe,jane@x.com,+12345678901,1,Type:No Interaction,Date:N/A")
        );
        assert_eq!(lines.next(), None);
        assert!(encoded.ends_with('\n'));
    }
}
