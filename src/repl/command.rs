//! Command parsing and execution
//!
//! Defines all REPL commands and their execution logic.

use super::state::ReplState;
use crate::contact::{ContactRecord, KeyScheme};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Command words and aliases recognised by [`Command::parse`]
pub const COMMAND_NAMES: &[&str] = &[
    "add", "insert", "search", "s", "find", "resolve", "get", "list", "all", "ls", "top",
    "frequent", "cache", "evict", "import", "stats", "info", "clear", "help", "?", "exit",
    "quit",
];

/// REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add or replace a contact: add <phone> <name>
    Add {
        /// Raw phone number
        phone: String,
        /// Raw name
        name: String,
    },
    /// Prefix search, recorded in the cache: search <prefix>
    Search {
        /// Key prefix
        prefix: String,
    },
    /// Resolve one contact: find <key>
    Find {
        /// Full key
        key: String,
    },
    /// List all contacts: list [limit]
    List {
        /// Maximum rows
        limit: Option<usize>,
    },
    /// Most frequently searched contacts: top [n]
    Top {
        /// Maximum rows; defaults to the configured report size
        limit: Option<usize>,
    },
    /// Show cache contents: cache
    Cache,
    /// Evict the least recently used cache entry: evict
    Evict,
    /// Insert contacts from a file: import <path>
    Import {
        /// File of `phone name` lines
        path: PathBuf,
    },
    /// Show statistics: stats | info
    Stats,
    /// Drop all contacts and cache entries: clear
    Clear,
    /// Show help: help [command]
    Help {
        /// Help topic
        topic: Option<String>,
    },
    /// Exit REPL: exit | quit
    Exit,
}

/// Command result
#[derive(Debug)]
pub enum CommandResult {
    /// Continue REPL
    Continue(String),
    /// Exit REPL
    Exit,
}

impl Command {
    /// Parse command from input string
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(anyhow::anyhow!("Empty command"));
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();
        let args = &parts[1..];

        match cmd.as_str() {
            "add" | "insert" => Self::parse_add(args),
            "search" | "s" => Self::parse_search(args),
            "find" | "resolve" | "get" => Self::parse_find(args),
            "list" | "all" | "ls" => Ok(Self::List {
                limit: Self::parse_optional_count(args, "list [limit]")?,
            }),
            "top" | "frequent" => Ok(Self::Top {
                limit: Self::parse_optional_count(args, "top [n]")?,
            }),
            "cache" => Ok(Self::Cache),
            "evict" => Ok(Self::Evict),
            "import" => Self::parse_import(args),
            "stats" | "info" => Ok(Self::Stats),
            "clear" => Ok(Self::Clear),
            "help" | "?" => Ok(Self::Help {
                topic: args.first().map(|s| s.to_lowercase()),
            }),
            "exit" | "quit" => Ok(Self::Exit),
            _ => Err(anyhow::anyhow!(
                "Unknown command: '{}'. Type 'help' for available commands.",
                cmd
            )),
        }
    }

    fn parse_add(args: &[&str]) -> Result<Self> {
        // The name is the last word; a phone number may be typed in groups.
        match args {
            [phone @ .., name] if !phone.is_empty() => Ok(Self::Add {
                phone: phone.join(" "),
                name: name.to_string(),
            }),
            _ => Err(anyhow::anyhow!("Usage: add <phone> <name>")),
        }
    }

    fn parse_search(args: &[&str]) -> Result<Self> {
        if args.is_empty() {
            return Err(anyhow::anyhow!("Usage: search <prefix>"));
        }
        // Phone numbers may be typed with spaces: `search 415 555`.
        Ok(Self::Search {
            prefix: args.join(" "),
        })
    }

    fn parse_find(args: &[&str]) -> Result<Self> {
        if args.is_empty() {
            return Err(anyhow::anyhow!("Usage: find <key>"));
        }
        Ok(Self::Find {
            key: args.join(" "),
        })
    }

    fn parse_import(args: &[&str]) -> Result<Self> {
        match args {
            [path] => Ok(Self::Import {
                path: PathBuf::from(path),
            }),
            _ => Err(anyhow::anyhow!("Usage: import <path>")),
        }
    }

    fn parse_optional_count(args: &[&str], usage: &str) -> Result<Option<usize>> {
        match args {
            [] => Ok(None),
            [n] => Ok(Some(n.parse().context("Invalid count value")?)),
            _ => Err(anyhow::anyhow!("Usage: {}", usage)),
        }
    }

    /// Execute command against the REPL state
    pub fn execute(&self, state: &mut ReplState) -> Result<CommandResult> {
        match self {
            Self::Add { phone, name } => {
                let record = state.make_record(phone, name);
                state.directory.insert(record.clone())?;
                Ok(CommandResult::Continue(format!(
                    "Added {}",
                    Self::format_record(&record).green()
                )))
            }

            Self::Search { prefix } => {
                let prefix = state.normalize_key(prefix);
                let results = state.directory.search(&prefix);
                if results.is_empty() {
                    return Ok(CommandResult::Continue("No results found.".yellow().to_string()));
                }
                Ok(CommandResult::Continue(Self::format_contacts(
                    &results,
                    state.scheme(),
                )))
            }

            Self::Find { key } => {
                let key = state.normalize_key(key);
                match state.directory.resolve(&key) {
                    Some(record) => Ok(CommandResult::Continue(Self::format_record(&record))),
                    None => Ok(CommandResult::Continue(format!(
                        "{} not found",
                        key.yellow()
                    ))),
                }
            }

            Self::List { limit } => {
                let mut contacts = state.directory.contacts();
                if contacts.is_empty() {
                    return Ok(CommandResult::Continue("No contacts.".yellow().to_string()));
                }
                let total = contacts.len();
                if let Some(limit) = limit {
                    contacts.truncate(*limit);
                }
                let mut output = Self::format_contacts(&contacts, state.scheme());
                if contacts.len() < total {
                    output.push_str(&format!(
                        "\n... {} more",
                        (total - contacts.len()).to_string().dimmed()
                    ));
                }
                Ok(CommandResult::Continue(output))
            }

            Self::Top { limit } => {
                let limit = limit.unwrap_or(state.config.top_limit);
                let top = state.directory.top_by_frequency(limit);
                if top.is_empty() {
                    return Ok(CommandResult::Continue(
                        "No contacts searched yet.".yellow().to_string(),
                    ));
                }
                let lines: Vec<String> = top
                    .iter()
                    .enumerate()
                    .map(|(i, (_, record, count))| {
                        format!(
                            "{:>3}. {}  {}",
                            i + 1,
                            Self::format_record(record),
                            format!("({} searches)", count).dimmed()
                        )
                    })
                    .collect();
                Ok(CommandResult::Continue(lines.join("\n")))
            }

            Self::Cache => {
                let entries = state.directory.cached();
                let stats = state.directory.stats();
                let mut output = format!(
                    "Cache {}/{} (most recent first)",
                    stats.cached.to_string().cyan(),
                    stats.capacity
                );
                for (key, record, count) in &entries {
                    output.push_str(&format!(
                        "\n  {}  {}  {}",
                        key.cyan(),
                        Self::other_field(record, state.scheme()),
                        format!("hits={}", count).dimmed()
                    ));
                }
                Ok(CommandResult::Continue(output))
            }

            Self::Evict => match state.directory.evict_lru() {
                Some(key) => Ok(CommandResult::Continue(format!("Evicted {}", key.yellow()))),
                None => Ok(CommandResult::Continue("Cache is empty".to_string())),
            },

            Self::Import { path } => {
                let report = state.import_file(path)?;
                let mut output = format!(
                    "Imported {} contact(s)",
                    report.inserted.to_string().green().bold()
                );
                for (line, reason) in &report.rejected {
                    output.push_str(&format!("\n  {} line {}: {}", "skipped".yellow(), line, reason));
                }
                Ok(CommandResult::Continue(output))
            }

            Self::Stats => {
                let stats = state.directory.stats();
                let output = format!(
                    "{}\n  Key scheme:    {} ({})\n  Contacts:      {}\n  Trie nodes:    {}\n\n{}\n  Entries:       {}/{}\n  Hits:          {}\n  Misses:        {}\n  Evictions:     {}\n  Not found:     {}",
                    "Directory".bold(),
                    state.scheme(),
                    state.scheme().alphabet_name(),
                    stats.contacts.to_string().green(),
                    stats.nodes,
                    "Cache".bold(),
                    stats.cached,
                    stats.capacity,
                    stats.cache.hits.to_string().green(),
                    stats.cache_misses.to_string().yellow(),
                    stats.cache.evictions,
                    stats.not_found,
                );
                Ok(CommandResult::Continue(output))
            }

            Self::Clear => {
                let count = state.directory.len();
                state.reset();
                Ok(CommandResult::Continue(format!(
                    "Cleared {} contact(s) and the cache",
                    count.to_string().yellow()
                )))
            }

            Self::Help { topic } => Ok(CommandResult::Continue(Self::help_text(topic.as_deref()))),

            Self::Exit => Ok(CommandResult::Exit),
        }
    }

    fn format_record(record: &ContactRecord) -> String {
        format!("{} - {}", record.name, record.phone)
    }

    fn other_field(record: &ContactRecord, scheme: KeyScheme) -> &str {
        match scheme {
            KeyScheme::Phone => &record.name,
            KeyScheme::Name => &record.phone,
        }
    }

    fn format_contacts(contacts: &[(String, ContactRecord)], scheme: KeyScheme) -> String {
        contacts
            .iter()
            .map(|(key, record)| format!("  {} - {}", key.cyan(), Self::other_field(record, scheme)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn help_text(topic: Option<&str>) -> String {
        match topic {
            Some("add") | Some("insert") => {
                "add <phone> <name>\n  Add a contact, replacing any contact with the same key.\n  Phone numbers may contain spaces and - . ( ) separators,\n  e.g. add (415) 555-0100 alice".to_string()
            }
            Some("search") | Some("s") => {
                "search <prefix>\n  List contacts whose key starts with <prefix>.\n  Each result counts as a lookup for the frequency report.".to_string()
            }
            Some("find") | Some("resolve") | Some("get") => {
                "find <key>\n  Look up one contact, checking the cache before the index.".to_string()
            }
            Some("top") | Some("frequent") => {
                "top [n]\n  Show the most frequently searched cached contacts.".to_string()
            }
            Some("import") => {
                "import <path>\n  Add contacts from a file with one `phone name` pair per line.".to_string()
            }
            Some(other) => format!("No help for '{}'. Type 'help' for all commands.", other),
            None => format!(
                "{}\n  add <phone> <name>   Add a contact\n  search <prefix>      Prefix search (recorded)\n  find <key>           Resolve one contact\n  list [limit]         All contacts in key order\n  top [n]              Frequently searched contacts\n  cache                Cache contents, most recent first\n  evict                Evict least recently used entry\n  import <path>        Add contacts from a file\n  stats                Directory and cache statistics\n  clear                Remove everything\n  help [command]       Show help\n  exit                 Leave",
                "Commands:".bold()
            ),
        }
    }
}
