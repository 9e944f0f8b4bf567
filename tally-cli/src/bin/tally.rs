use clap::{Parser, Subcommand, command};
use tally_cli::api_client::ApiClient;
use tally_core::Error;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Coordinator API URL
    #[arg(
        long,
        short = 'u',
        default_value = "http://localhost:8080",
        env = "TALLY_API_URL",
        global = true
    )]
    api_url: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit and inspect expressions (remote API)
    Expression {
        #[command(subcommand)]
        command: ExpressionCommands,
    },

    /// Manage worker agents (remote API)
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },

    /// Evaluate an expression locally, without a coordinator
    Eval(EvalArgs),
}

#[derive(Subcommand)]
enum ExpressionCommands {
    /// Submit an expression for evaluation
    Submit {
        /// Expression text, e.g. "2+3*4"
        #[arg()]
        expression: String,
    },

    /// Show the current status of an expression
    Status {
        /// Expression ID
        #[arg()]
        id: String,
    },

    /// Fetch the outcome of a finished expression
    Result {
        /// Expression ID
        #[arg()]
        id: String,
    },

    /// List all submitted expressions
    List,
}

#[derive(Subcommand)]
enum AgentCommands {
    /// Register an agent with the coordinator
    Register {
        /// Agent ID
        #[arg()]
        id: String,

        /// Agent base address, e.g. http://127.0.0.1:8081
        #[arg()]
        address: String,
    },

    /// List registered agents
    List,
}

#[derive(Parser)]
struct EvalArgs {
    /// Expression text to evaluate in-process
    #[arg()]
    expression: String,
}

fn get_api_client(cli: &Cli) -> ApiClient {
    ApiClient::new(&cli.api_url)
}

fn output_json<T: serde::Serialize>(data: &T) -> Result<(), Error> {
    let output = serde_json::to_string_pretty(data)
        .map_err(|e| Error::Internal(format!("JSON serialization error: {}", e)))?;
    println!("{}", output);
    Ok(())
}

async fn handle_expression_commands(cmd: &ExpressionCommands, cli: &Cli) -> Result<(), Error> {
    let client = get_api_client(cli);

    match cmd {
        ExpressionCommands::Submit { expression } => {
            let response = client
                .submit_expression(expression)
                .await
                .map_err(|e| Error::Internal(format!("API error: {}", e)))?;
            output_json(&response)
        }

        ExpressionCommands::Status { id } => {
            let response = client
                .get_status(id)
                .await
                .map_err(|e| Error::Internal(format!("API error: {}", e)))?;
            output_json(&response)
        }

        ExpressionCommands::Result { id } => {
            let response = client
                .get_result(id)
                .await
                .map_err(|e| Error::Internal(format!("API error: {}", e)))?;
            output_json(&response)
        }

        ExpressionCommands::List => {
            let response = client
                .list_expressions()
                .await
                .map_err(|e| Error::Internal(format!("API error: {}", e)))?;
            output_json(&response)
        }
    }
}

async fn handle_agent_commands(cmd: &AgentCommands, cli: &Cli) -> Result<(), Error> {
    let client = get_api_client(cli);

    match cmd {
        AgentCommands::Register { id, address } => {
            let response = client
                .register_agent(id, address)
                .await
                .map_err(|e| Error::Internal(format!("API error: {}", e)))?;
            output_json(&response)
        }

        AgentCommands::List => {
            let response = client
                .list_agents()
                .await
                .map_err(|e| Error::Internal(format!("API error: {}", e)))?;
            output_json(&response)
        }
    }
}

async fn eval_local(args: &EvalArgs) -> Result<(), Error> {
    debug!("evaluating locally: {}", args.expression);
    let result = tally_core::evaluate(&args.expression)?;
    println!("{}", result);
    Ok(())
}

async fn run(cli: &Cli) -> Result<(), Error> {
    match &cli.command {
        Commands::Expression { command } => handle_expression_commands(command, cli).await,
        Commands::Agent { command } => handle_agent_commands(command, cli).await,
        Commands::Eval(args) => eval_local(args).await,
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
