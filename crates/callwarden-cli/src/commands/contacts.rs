use crate::commands::{print_json, Context};
use crate::util::now_utc;
use anyhow::Result;
use callwarden_store::repo::ContactNew;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    /// Add a trusted number
    Add(AddArgs),
    /// Remove a trusted number
    Rm(RmArgs),
    /// List trusted numbers
    Ls,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub number: String,
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct RmArgs {
    pub number: String,
}

#[derive(Debug, Serialize)]
struct ContactDto {
    id: i64,
    name: Option<String>,
    number: String,
    created_at: i64,
}

pub fn add(ctx: &Context<'_>, args: AddArgs) -> Result<()> {
    let contact = ctx.store.contacts().add(
        now_utc(),
        ContactNew {
            name: args.name,
            number: args.number,
        },
    )?;

    if ctx.json {
        return print_json(&ContactDto {
            id: contact.id,
            name: contact.name,
            number: contact.number,
            created_at: contact.created_at,
        });
    }
    println!("added {}", contact.number);
    Ok(())
}

pub fn remove(ctx: &Context<'_>, args: RmArgs) -> Result<()> {
    ctx.store.contacts().remove(&args.number)?;
    if !ctx.json {
        println!("removed {}", args.number);
    }
    Ok(())
}

pub fn list(ctx: &Context<'_>) -> Result<()> {
    let contacts = ctx.store.contacts().list()?;

    if ctx.json {
        let items: Vec<ContactDto> = contacts
            .into_iter()
            .map(|c| ContactDto {
                id: c.id,
                name: c.name,
                number: c.number,
                created_at: c.created_at,
            })
            .collect();
        return print_json(&items);
    }

    for contact in contacts {
        match contact.name {
            Some(name) => println!("{}  {}", contact.number, name),
            None => println!("{}", contact.number),
        }
    }
    Ok(())
}
