use crate::output::formatter;
use anyhow::Result;
use clap::{Args, Subcommand};
use jules_api::types::{CreateSessionRequest, GithubRepoContext, SourceContext};
use jules_api::JulesClient;

#[derive(Subcommand)]
pub enum SessionsCommand {
    /// Create a new session
    Create(CreateSessionArgs),
    /// List all sessions
    List(ListSessionsArgs),
    /// Get a specific session by ID
    Get(GetSessionArgs),
    /// Approve the pending plan of a session
    ApprovePlan(ApprovePlanArgs),
    /// Send a message into a running session
    SendMessage(SendMessageArgs),
}

#[derive(Args)]
pub struct CreateSessionArgs {
    /// The source to create a session on, e.g. `sources/github/owner/repo`
    #[arg(long, required = true)]
    pub source: String,
    /// What the agent should do
    #[arg(long, required = true)]
    pub prompt: String,
    /// Branch to start from
    #[arg(long)]
    pub starting_branch: Option<String>,
    /// Optional session title
    #[arg(long)]
    pub title: Option<String>,
    /// Require explicit plan approval before the agent starts working
    #[arg(long)]
    pub require_plan_approval: bool,
}

#[derive(Args)]
pub struct ListSessionsArgs {
    #[arg(short = 's', long)]
    page_size: Option<u32>,
    #[arg(short = 't', long)]
    page_token: Option<String>,
}

#[derive(Args)]
pub struct GetSessionArgs {
    /// The ID of the session to retrieve
    #[arg(required = true)]
    pub session_id: String,
}

#[derive(Args)]
pub struct ApprovePlanArgs {
    /// The ID of the session whose plan to approve
    #[arg(required = true)]
    pub session_id: String,
}

#[derive(Args)]
pub struct SendMessageArgs {
    /// The ID of the session to message
    #[arg(required = true)]
    pub session_id: String,
    /// The message text
    #[arg(required = true)]
    pub prompt: String,
}

pub async fn handle_sessions_command(
    command: &SessionsCommand,
    client: &JulesClient,
    format: &str,
) -> Result<()> {
    match command {
        SessionsCommand::Create(args) => {
            let request = CreateSessionRequest {
                prompt: args.prompt.clone(),
                source_context: SourceContext {
                    source: args.source.clone(),
                    github_repo_context: args.starting_branch.clone().map(|branch| {
                        GithubRepoContext {
                            starting_branch: branch,
                        }
                    }),
                },
                title: args.title.clone(),
                require_plan_approval: args.require_plan_approval.then_some(true),
            };
            let session = client.create_session(request).await?;
            formatter::print_session(&session, format)?;
        }
        SessionsCommand::List(args) => {
            let response = client
                .list_sessions(args.page_size, args.page_token.as_deref())
                .await?;
            formatter::print_sessions_response(&response, format)?;
        }
        SessionsCommand::Get(args) => {
            let session = client.get_session(&args.session_id).await?;
            formatter::print_session(&session, format)?;
        }
        SessionsCommand::ApprovePlan(args) => {
            client.approve_plan(&args.session_id).await?;
            println!("Plan approved for session {}.", args.session_id);
        }
        SessionsCommand::SendMessage(args) => {
            client.send_message(&args.session_id, &args.prompt).await?;
            println!("Message sent to session {}.", args.session_id);
        }
    }
    Ok(())
}
