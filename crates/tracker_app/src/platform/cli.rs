use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracker_core::{JobDraft, JobPatch, Msg, Priority, RecordId, Stage};

#[derive(Debug, Parser)]
#[command(name = "tracker", about = "Track job applications against the jobs API")]
pub struct Cli {
    /// RON configuration file; defaults apply when it does not exist.
    #[arg(long, default_value = "tracker.ron")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List jobs, optionally filtered.
    List(ListArgs),
    /// Show stage and priority counts.
    Stats,
    /// Add a job.
    Add(AddArgs),
    /// Edit fields of a job.
    Edit(EditArgs),
    /// Add a note to a job.
    Note { id: String, content: String },
    /// Create a tag and attach it to a job.
    Tag {
        id: String,
        name: String,
        /// `#RRGGBB`.
        #[arg(long, default_value = "#6B7280")]
        color: String,
    },
    /// Remove a tag from a job.
    Untag { id: String, tag_id: String },
    /// Delete a job.
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub stage: Option<Stage>,
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Matches title, company or description.
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub company: String,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long, default_value = "APPLIED")]
    pub stage: Stage,
    #[arg(long, default_value = "MEDIUM")]
    pub priority: Priority,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub stage: Option<Stage>,
    #[arg(long)]
    pub priority: Option<Priority>,
}

impl Command {
    /// Dashboard messages for this command, in order. Every command seeds
    /// the collection from the server first.
    pub fn into_messages(self) -> Vec<Msg> {
        match self {
            Command::List(args) => {
                let mut msgs = Vec::new();
                if let Some(search) = args.search {
                    msgs.push(Msg::SearchChanged(search));
                }
                msgs.push(Msg::StageFilterChanged(args.stage));
                msgs.push(Msg::PriorityFilterChanged(args.priority));
                msgs.push(Msg::RefreshRequested);
                msgs
            }
            Command::Stats => vec![Msg::RefreshRequested],
            Command::Add(args) => vec![
                Msg::RefreshRequested,
                Msg::CreateRequested(JobDraft {
                    title: args.title,
                    company: args.company,
                    location: args.location,
                    description: args.description,
                    salary: args.salary,
                    url: args.url,
                    stage: args.stage,
                    priority: args.priority,
                }),
            ],
            Command::Edit(args) => vec![
                Msg::RefreshRequested,
                Msg::EditRequested {
                    id: RecordId::server(args.id),
                    patch: JobPatch {
                        title: args.title,
                        company: args.company,
                        location: args.location,
                        description: args.description,
                        salary: args.salary,
                        url: args.url,
                        stage: args.stage,
                        priority: args.priority,
                    },
                },
            ],
            Command::Note { id, content } => vec![
                Msg::RefreshRequested,
                Msg::NoteRequested {
                    id: RecordId::server(id),
                    content,
                },
            ],
            Command::Tag { id, name, color } => vec![
                Msg::RefreshRequested,
                Msg::TagRequested {
                    id: RecordId::server(id),
                    name,
                    color,
                },
            ],
            Command::Untag { id, tag_id } => vec![
                Msg::RefreshRequested,
                Msg::TagRemovalRequested {
                    id: RecordId::server(id),
                    tag_id,
                },
            ],
            Command::Delete { id } => vec![
                Msg::RefreshRequested,
                Msg::DeleteRequested {
                    id: RecordId::server(id),
                },
            ],
        }
    }
}
