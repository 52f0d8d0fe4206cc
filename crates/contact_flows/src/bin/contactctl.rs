#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use contact_cache::{FileBackend, SlugCache};
use contact_client::{ContactStore, ContactStoreClient, ContactStoreConfig};
use contact_contracts::{ContactDraft, ContactId, ContactUpdate, PhoneNumber};
use contact_flows::{delete_contact, fetch_contact_page, save_contact, search_contacts};

const DEFAULT_ENDPOINT: &str = "https://wpe-hiring.tokopedia.net/graphql";
const DEFAULT_CACHE_PATH: &str = "contacts_cache.json";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let client = match build_client() {
        Ok(client) => client,
        Err(reason) => {
            eprintln!("contactctl config error: {reason}");
            return ExitCode::FAILURE;
        }
    };
    let mut cache = SlugCache::new(Box::new(FileBackend::new(cache_path())));

    let result = match command.as_str() {
        "list" => run_list(&client, &args[1..]),
        "search" => run_search(&client, &args[1..]),
        "get" => run_get(&client, &args[1..]),
        "create" => run_create(&client, &mut cache, &args[1..]),
        "update" => run_update(&client, &mut cache, &args[1..]),
        "delete" => run_delete(&client, &mut cache, &args[1..]),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(line) => {
            eprintln!("{line}");
            ExitCode::FAILURE
        }
    }
}

const USAGE: &str = "usage: contactctl <command>
  list [page_index]
  search <last-name-substring>
  get <id>
  create <first_name> <last_name> [phone ...]
  update <id> <first_name> <last_name>
  delete <id>

environment:
  CONTACT_GRAPHQL_ENDPOINT  graph endpoint (default: hiring demo endpoint)
  CONTACT_HTTP_TIMEOUT_MS   per-phase timeout (default: 5000)
  CONTACT_CACHE_PATH        slug cache file (default: contacts_cache.json)";

fn build_client() -> Result<ContactStoreClient, String> {
    let endpoint =
        env::var("CONTACT_GRAPHQL_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
    let timeout_ms = env::var("CONTACT_HTTP_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(contact_client::DEFAULT_TIMEOUT_MS);
    let config = ContactStoreConfig::v1(
        endpoint,
        timeout_ms,
        contact_client::DEFAULT_USER_AGENT.to_string(),
    )
    .map_err(|violation| format!("{violation:?}"))?;
    ContactStoreClient::new(config).map_err(|violation| format!("{violation:?}"))
}

fn cache_path() -> PathBuf {
    env::var("CONTACT_CACHE_PATH")
        .unwrap_or_else(|_| DEFAULT_CACHE_PATH.to_string())
        .into()
}

fn parse_id(raw: Option<&String>) -> Result<ContactId, String> {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .map(ContactId)
        .ok_or_else(|| "contactctl: expected a positive integer id".to_string())
}

fn run_list(client: &ContactStoreClient, args: &[String]) -> Result<(), String> {
    let page_index = args
        .first()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(0);
    let contacts =
        fetch_contact_page(client, page_index).map_err(|e| e.safe_log_line("list_contacts"))?;
    for contact in &contacts {
        println!("{}", serde_json::to_string(contact).unwrap_or_default());
    }
    Ok(())
}

fn run_search(client: &ContactStoreClient, args: &[String]) -> Result<(), String> {
    let needle = args.first().ok_or_else(|| USAGE.to_string())?;
    let contacts =
        search_contacts(client, needle).map_err(|e| e.safe_log_line("search_contacts"))?;
    for contact in &contacts {
        println!("{}", serde_json::to_string(contact).unwrap_or_default());
    }
    Ok(())
}

fn run_get(client: &ContactStoreClient, args: &[String]) -> Result<(), String> {
    let id = parse_id(args.first())?;
    match client
        .get_contact(id)
        .map_err(|e| e.safe_log_line("get_contact"))?
    {
        Some(contact) => {
            println!("{}", serde_json::to_string(&contact).unwrap_or_default());
            Ok(())
        }
        None => Err(format!("contactctl: contact {} not found", id.0)),
    }
}

fn run_create(
    client: &ContactStoreClient,
    cache: &mut SlugCache,
    args: &[String],
) -> Result<(), String> {
    let [first_name, last_name, phone_args @ ..] = args else {
        return Err(USAGE.to_string());
    };
    let phones: Result<Vec<PhoneNumber>, _> = phone_args
        .iter()
        .map(|n| PhoneNumber::v1(n.clone()))
        .collect();
    let draft = ContactDraft::v1(
        first_name.clone(),
        last_name.clone(),
        phones.map_err(|violation| format!("{violation:?}"))?,
    )
    .map_err(|violation| format!("{violation:?}"))?;

    let outcome =
        save_contact(client, cache, &draft, None).map_err(|e| e.safe_log_line())?;
    if let Some(cache_err) = outcome.cache_error {
        eprintln!("{}", cache_err.safe_log_line("upsert"));
    }
    println!(
        "{}",
        serde_json::to_string(&outcome.contact).unwrap_or_default()
    );
    Ok(())
}

fn run_update(
    client: &ContactStoreClient,
    cache: &mut SlugCache,
    args: &[String],
) -> Result<(), String> {
    let [id_raw, first_name, last_name] = args else {
        return Err(USAGE.to_string());
    };
    let id = parse_id(Some(id_raw))?;
    // The update path cannot carry phones; the draft holds none.
    let update = ContactUpdate::v1(first_name.clone(), last_name.clone())
        .map_err(|violation| format!("{violation:?}"))?;
    let draft = ContactDraft {
        first_name: update.first_name.clone(),
        last_name: update.last_name.clone(),
        phones: Vec::new(),
    };

    let outcome =
        save_contact(client, cache, &draft, Some(id)).map_err(|e| e.safe_log_line())?;
    if let Some(cache_err) = outcome.cache_error {
        eprintln!("{}", cache_err.safe_log_line("upsert"));
    }
    println!(
        "{}",
        serde_json::to_string(&outcome.contact).unwrap_or_default()
    );
    Ok(())
}

fn run_delete(
    client: &ContactStoreClient,
    cache: &mut SlugCache,
    args: &[String],
) -> Result<(), String> {
    let id = parse_id(args.first())?;
    let outcome =
        delete_contact(client, cache, id).map_err(|e| e.safe_log_line("delete_contact"))?;
    if let Some(cache_err) = outcome.cache_error {
        eprintln!("{}", cache_err.safe_log_line("remove"));
    }
    match outcome.summary {
        Some(summary) => {
            println!("{}", serde_json::to_string(&summary).unwrap_or_default());
            Ok(())
        }
        None => Err(format!("contactctl: contact {} was already gone", id.0)),
    }
}
