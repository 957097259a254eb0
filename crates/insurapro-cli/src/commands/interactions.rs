use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::render;
use crate::util::{parse_customer_id, today_label};
use anyhow::Result;
use clap::Args;
use insurapro_core::domain::InteractionNew;
use insurapro_core::rules::{check_interaction_field, format_interaction};
use insurapro_core::dto::InteractionDto;

#[derive(Debug, Args)]
pub struct AddInteractionArgs {
    pub id: String,
    /// Free-form label such as Meeting, Contact or Contract
    #[arg(long = "type")]
    pub kind: String,
    /// Defaults to today, as dd/mm/yyyy
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Args)]
pub struct InteractionsArgs {
    pub id: String,
}

pub fn add_interaction(ctx: &mut Context<'_>, args: AddInteractionArgs) -> Result<()> {
    let id = parse_customer_id(&args.id)?;
    let date = args.date.unwrap_or_else(today_label);
    check_interaction_field("type", &args.kind)
        .and_then(|()| check_interaction_field("date", &date))
        .map_err(|err| invalid_input(err.to_string()))?;
    let interaction = ctx.store.add_interaction(
        id,
        InteractionNew {
            kind: args.kind,
            date,
        },
    )?;

    if ctx.json {
        print_json(&InteractionDto::from(&interaction))?;
    } else {
        println!("added interaction to {}: {}", id, format_interaction(&interaction));
    }
    Ok(())
}

pub fn list_interactions(ctx: &mut Context<'_>, args: InteractionsArgs) -> Result<()> {
    let id = parse_customer_id(&args.id)?;
    let customer = ctx
        .store
        .find_by_id(id)
        .ok_or_else(|| not_found(format!("customer {id}")))?;

    if ctx.json {
        let items: Vec<InteractionDto> = customer
            .recorded_interactions()
            .map(InteractionDto::from)
            .collect();
        return print_json(&items);
    }

    for line in render::interaction_lines(customer) {
        println!("{line}");
    }
    Ok(())
}
