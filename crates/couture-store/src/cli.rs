//! CLI module for couture-store.
//!
//! This module provides the command-line interface for managing client
//! records. It can be used either as a standalone binary or as a subcommand
//! of the main couture-rs CLI.
//!
//! # Usage
//!
//! ```bash
//! # Seed the demonstration set into a local file store
//! couture-clients -s file:./data seed
//!
//! # List current (non-archived) orders that are not delivered yet
//! couture-clients list --view clients --filter active
//!
//! # Add a client through a running server
//! couture-clients -s http://localhost:4000 add -n "Marie Diop" -p "77 123 45 67" \
//!     -d "Robe de soirée" --price 25000 -m bust=92 -m waist=75
//!
//! # Mark delivered, then archive
//! couture-clients deliver 1700000000000
//! couture-clients archive 1700000000000
//! ```

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use couture_core::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_RECENT_LIMIT, DEFAULT_STORE_LOCATION, StoreLocation};
use tabled::{Table, Tabled};
use time::macros::format_description;

use crate::form::ClientForm;
use crate::open::{SharedStore, open_store};
use crate::query::{ClientQuery, ClientView, StatusFilter};
use crate::record::ClientRecord;
use crate::service::ClientService;

/// Client records management CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "couture-clients",
    version,
    about = "Manage tailoring client records"
)]
pub struct ClientsArgs {
    /// Store location (memory:, file:<dir>, http(s)://..., sqlite:..., postgres://...).
    #[arg(short, long, global = true, env = "COUTURE_STORE", default_value = DEFAULT_STORE_LOCATION)]
    pub store: String,

    /// Request timeout for remote stores, in seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: ClientsCommands,
}

/// Output format for listings.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Client CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ClientsCommands {
    /// List clients.
    List {
        /// Which records to show.
        #[arg(long, value_enum, default_value_t = ClientView::Clients)]
        view: ClientView,

        /// Status filter within the view.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        filter: StatusFilter,

        /// Case-insensitive search on name, phone and description.
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show one client.
    Show {
        id: String,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Add a client.
    Add {
        #[command(flatten)]
        fields: FormArgs,
    },

    /// Edit a client. Omitted options keep their current value.
    Edit {
        id: String,

        #[command(flatten)]
        fields: EditArgs,
    },

    /// Permanently delete a client.
    Delete { id: String },

    /// Move a client to the archives.
    Archive { id: String },

    /// Bring a client back from the archives.
    Unarchive { id: String },

    /// Mark a client's order as delivered.
    Deliver { id: String },

    /// Insert the demonstration set if the store is empty.
    Seed,

    /// Show dashboard counters and the most recent clients.
    Stats {
        /// Number of recent clients to list.
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        recent: usize,
    },
}

/// Fields of a new client.
#[derive(clap::Args, Debug, Clone)]
pub struct FormArgs {
    #[arg(short, long)]
    pub name: String,

    #[arg(short, long)]
    pub phone: String,

    /// Order description.
    #[arg(short, long)]
    pub description: String,

    /// Free-text measurements.
    #[arg(long, default_value = "")]
    pub measurements: String,

    /// Price (decimals are truncated).
    #[arg(long, default_value = "0")]
    pub price: String,

    /// Fabric photo URL or data URI.
    #[arg(long)]
    pub photo: Option<String>,

    /// Named measurement in cm, e.g. `-m bust=92`. Repeatable.
    #[arg(short = 'm', long = "measure", value_parser = parse_measure)]
    pub measures: Vec<(String, String)>,
}

/// Fields to change on an existing client.
#[derive(clap::Args, Debug, Clone)]
pub struct EditArgs {
    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long)]
    pub phone: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub measurements: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    /// New fabric photo. An empty value removes it.
    #[arg(long)]
    pub photo: Option<String>,

    /// Named measurement in cm; an empty value removes it. Repeatable.
    #[arg(short = 'm', long = "measure", value_parser = parse_measure)]
    pub measures: Vec<(String, String)>,
}

fn parse_measure(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {s:?}"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

impl From<FormArgs> for ClientForm {
    fn from(args: FormArgs) -> Self {
        Self {
            name: args.name,
            phone: args.phone,
            description: args.description,
            measurements: args.measurements,
            price: args.price,
            fabric_photo: args.photo,
            specific_measurements: args.measures,
            date: None,
        }
    }
}

impl EditArgs {
    /// Overlay the supplied options on a form prefilled from the record.
    fn apply_to(self, form: &mut ClientForm) {
        if let Some(v) = self.name {
            form.name = v;
        }
        if let Some(v) = self.phone {
            form.phone = v;
        }
        if let Some(v) = self.description {
            form.description = v;
        }
        if let Some(v) = self.measurements {
            form.measurements = v;
        }
        if let Some(v) = self.price {
            form.price = v;
        }
        if let Some(v) = self.photo {
            form.fabric_photo = Some(v);
        }
        for (key, value) in self.measures {
            let existing = form
                .specific_measurements
                .iter_mut()
                .find(|(k, _)| canonical_key(k) == canonical_key(&key));
            match existing {
                Some(slot) => slot.1 = value,
                None => form.specific_measurements.push((key, value)),
            }
        }
    }
}

fn canonical_key(key: &str) -> String {
    key.replace('_', "").to_lowercase()
}

/// Client row for display.
#[derive(Tabled)]
struct ClientDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Price")]
    price: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&ClientRecord> for ClientDisplay {
    fn from(r: &ClientRecord) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            phone: r.phone.clone(),
            description: r.description.clone(),
            price: r.price,
            date: format_date(r),
            status: status_label(r).to_string(),
        }
    }
}

fn format_date(r: &ClientRecord) -> String {
    r.date
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| r.date.to_string())
}

fn status_label(r: &ClientRecord) -> &'static str {
    match (r.delivered, r.archived) {
        (false, false) => "Pending",
        (true, false) => "Delivered",
        (false, true) => "Archived",
        (true, true) => "Delivered, archived",
    }
}

/// Run the clients CLI with the given arguments.
///
/// This is the main entry point for the clients CLI, used by both the
/// standalone binary and the unified couture-rs CLI.
pub async fn run(args: ClientsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let location: StoreLocation = args.store.parse()?;
    let store = open_store(&location, Duration::from_secs(args.timeout)).await?;
    let service = ClientService::new(store);

    match args.command {
        ClientsCommands::List {
            view,
            filter,
            search,
            format,
        } => {
            let mut query = ClientQuery::new().view(view).filter(filter);
            if let Some(text) = search {
                query = query.search(text);
            }
            let clients = service.find_clients(&query).await?;
            print_list(&clients, format)
        }
        ClientsCommands::Show { id, format } => {
            let client = require(service.get_client_by_id(&id).await?, &id)?;
            print_detail(&client, format)
        }
        ClientsCommands::Add { fields } => {
            let client = ClientForm::from(fields).into_new_client()?;
            let created = service.add_client(client).await?;
            println!("Client added successfully.");
            println!("  ID: {}", created.id);
            Ok(())
        }
        ClientsCommands::Edit { id, fields } => edit_client(&service, &id, fields).await,
        ClientsCommands::Delete { id } => {
            if !service.delete_client(&id).await? {
                return Err(not_found(&id));
            }
            println!("Client {id} deleted.");
            Ok(())
        }
        ClientsCommands::Archive { id } => {
            require(service.archive_client(&id).await?, &id)?;
            println!("Client {id} archived.");
            Ok(())
        }
        ClientsCommands::Unarchive { id } => {
            require(service.unarchive_client(&id).await?, &id)?;
            println!("Client {id} restored from archives.");
            Ok(())
        }
        ClientsCommands::Deliver { id } => {
            require(service.mark_as_delivered(&id).await?, &id)?;
            println!("Client {id} marked as delivered.");
            Ok(())
        }
        ClientsCommands::Seed => {
            match service.generate_sample_clients().await? {
                0 => println!("Store is not empty, nothing seeded."),
                n => println!("Inserted {n} sample clients."),
            }
            Ok(())
        }
        ClientsCommands::Stats { recent } => {
            let stats = service.dashboard().await?;
            println!("Total:     {}", stats.total);
            println!("Active:    {}", stats.active);
            println!("Delivered: {}", stats.delivered);
            println!("Archived:  {}", stats.archived);
            let recent = service.recent_clients(recent).await?;
            if !recent.is_empty() {
                println!();
                println!("Recent clients:");
                print_list(&recent, OutputFormat::Table)?;
            }
            Ok(())
        }
    }
}

async fn edit_client(
    service: &ClientService<SharedStore>,
    id: &str,
    fields: EditArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let current = require(service.get_client_by_id(id).await?, id)?;
    let mut form = ClientForm::from_record(&current);
    fields.apply_to(&mut form);
    let patch = form.into_patch()?;
    require(service.update_client(id, patch).await?, id)?;
    println!("Client {id} updated.");
    Ok(())
}

fn not_found(id: &str) -> Box<dyn std::error::Error> {
    format!("Client not found: {id}").into()
}

fn require(
    client: Option<ClientRecord>,
    id: &str,
) -> Result<ClientRecord, Box<dyn std::error::Error>> {
    client.ok_or_else(|| not_found(id))
}

fn print_list(
    clients: &[ClientRecord],
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(clients)?),
        OutputFormat::Table if clients.is_empty() => println!("No clients found."),
        OutputFormat::Table => {
            let rows: Vec<ClientDisplay> = clients.iter().map(ClientDisplay::from).collect();
            println!("{}", Table::new(rows));
        }
    }
    Ok(())
}

fn print_detail(
    client: &ClientRecord,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(client)?);
        return Ok(());
    }
    println!("ID:           {}", client.id);
    println!("Name:         {}", client.name);
    println!("Phone:        {}", client.phone);
    println!("Description:  {}", client.description);
    println!("Price:        {}", client.price);
    println!("Date:         {}", format_date(client));
    println!("Status:       {}", status_label(client));
    if !client.measurements.is_empty() {
        println!("Measurements: {}", client.measurements);
    }
    if let Some(specific) = &client.specific_measurements {
        for (key, value) in specific.entries() {
            println!("  {key}: {value} cm");
        }
    }
    if let Some(photo) = &client.fabric_photo {
        if photo.starts_with("data:") {
            println!("Fabric photo: (inline image, {} bytes)", photo.len());
        } else {
            println!("Fabric photo: {photo}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = ClientsArgs::try_parse_from([
            "couture-clients",
            "-s",
            "memory:",
            "add",
            "-n",
            "Marie Diop",
            "-p",
            "77 123 45 67",
            "-d",
            "Robe",
            "--price",
            "25000",
            "-m",
            "bust=92",
        ])
        .unwrap();
        assert_eq!(args.store, "memory:");
        let ClientsCommands::Add { fields } = args.command else {
            panic!("expected add");
        };
        assert_eq!(fields.measures, vec![("bust".to_string(), "92".to_string())]);
    }

    #[test]
    fn test_parse_measure_requires_equals() {
        assert!(parse_measure("bust").is_err());
        assert_eq!(
            parse_measure(" arm_length = 61 ").unwrap(),
            ("arm_length".to_string(), "61".to_string())
        );
    }

    #[test]
    fn test_edit_overlays_measurements() {
        let mut form = ClientForm {
            specific_measurements: vec![("armLength".into(), "60".into())],
            ..Default::default()
        };
        EditArgs {
            name: Some("Fatou".into()),
            phone: None,
            description: None,
            measurements: None,
            price: None,
            photo: None,
            measures: vec![("arm_length".into(), "62".into()), ("neck".into(), "35".into())],
        }
        .apply_to(&mut form);
        assert_eq!(form.name, "Fatou");
        assert_eq!(
            form.specific_measurements,
            vec![
                ("armLength".to_string(), "62".to_string()),
                ("neck".to_string(), "35".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_run_against_memory_store() {
        let args = ClientsArgs::try_parse_from(["couture-clients", "-s", "memory:", "seed"]).unwrap();
        run(args).await.unwrap();

        let args =
            ClientsArgs::try_parse_from(["couture-clients", "-s", "memory:", "deliver", "missing"]).unwrap();
        assert!(run(args).await.is_err());
    }
}
