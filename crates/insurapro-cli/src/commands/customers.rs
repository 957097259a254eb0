use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::render;
use crate::util::parse_customer_id;
use anyhow::Result;
use clap::Args;
use insurapro_core::domain::{CustomerNew, CustomerUpdate};
use insurapro_core::dto::CustomerDto;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub first: String,
    #[arg(long)]
    pub last: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// First or last name, matched exactly
    pub name: String,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub first: Option<String>,
    #[arg(long)]
    pub last: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

pub fn add_customer(ctx: &mut Context<'_>, args: AddArgs) -> Result<()> {
    let input = CustomerNew {
        first_name: args.first,
        last_name: args.last,
        email: args.email,
        phone: args.phone,
    };
    input.validate()?;

    let customer = ctx.store.add(input)?;
    if ctx.json {
        print_json(&CustomerDto::from(&customer))?;
    } else {
        println!("created {} {}", customer.id, customer.full_name());
    }
    Ok(())
}

pub fn list_customers(ctx: &mut Context<'_>) -> Result<()> {
    let customers = ctx.store.customers();
    if ctx.json {
        let items: Vec<CustomerDto> = customers.iter().map(CustomerDto::from).collect();
        return print_json(&items);
    }
    print!("{}", render::customer_table(customers));
    Ok(())
}

pub fn search_customers(ctx: &mut Context<'_>, args: SearchArgs) -> Result<()> {
    let matches = ctx.store.find_by_name(&args.name);
    if ctx.json {
        let items: Vec<CustomerDto> = matches.iter().map(|c| CustomerDto::from(*c)).collect();
        return print_json(&items);
    }
    print!("{}", render::customer_table(matches.iter().copied()));
    if matches.is_empty() {
        println!("{}", render::NO_CUSTOMERS_FOUND);
    }
    Ok(())
}

pub fn edit_customer(ctx: &mut Context<'_>, args: EditArgs) -> Result<()> {
    let id = parse_customer_id(&args.id)?;
    let update = CustomerUpdate {
        first_name: args.first,
        last_name: args.last,
        email: args.email,
        phone: args.phone,
    };
    if update.is_empty() {
        return Err(invalid_input("no updates provided"));
    }
    update.validate()?;

    let customer = ctx.store.modify(id, update)?;
    if ctx.json {
        print_json(&CustomerDto::from(&customer))?;
    } else {
        println!("updated {} {}", customer.id, customer.full_name());
    }
    Ok(())
}

pub fn delete_customer(ctx: &mut Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_customer_id(&args.id)?;
    let customer = ctx.store.delete(id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "id": customer.id }))?;
    } else {
        println!("deleted {} {}", customer.id, customer.full_name());
    }
    Ok(())
}
