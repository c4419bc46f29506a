use clap::Parser;
use log::error;
use std::str::FromStr;
use survey::application::{
    init::init, list_customers, AddCustomerRequest, AddCustomerService, ConfigService,
    ExportService,
};
use survey::cli::{format_customer_list, Cli, Commands};
use survey::domain::BackendKind;
use survey::error::SurveyError;
use survey::infrastructure::{Config, SurveyRepository, WorkspaceRepository};
use survey::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            error!("event=command module=cli status=error error={}", e);
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Discover the workspace, load its config and start file logging for it
fn open_workspace() -> Result<(WorkspaceRepository, Config), SurveyError> {
    let repo = WorkspaceRepository::discover()?;
    let config = repo.load_config()?;
    if let Err(msg) = init_logging(&config.get_log_level(), &repo.log_dir()) {
        eprintln!("Warning: logging disabled: {}", msg);
    }
    Ok((repo, config))
}

fn run(cli: Cli) -> Result<(), SurveyError> {
    match cli.command {
        Commands::Init {
            path,
            backend,
            data_file,
        } => {
            let backend = BackendKind::from_str(&backend).map_err(SurveyError::Config)?;
            let config = init(&path, backend, data_file.as_deref())?;

            println!("Initialized survey workspace at {}", path.display());
            println!("Backend: {}", config.backend);
            println!("Data file: {}", config.data_file);
            Ok(())
        }
        Commands::Add {
            email,
            flag,
            number,
        } => {
            let (repo, config) = open_workspace()?;
            let service = AddCustomerService::new(repo, config);
            let customer = service.execute(&AddCustomerRequest {
                email,
                flag,
                number,
            })?;
            println!("Added customer {}", customer.email);
            Ok(())
        }
        Commands::List => {
            let (repo, config) = open_workspace()?;
            let customers = list_customers(&repo, &config)?;
            print!("{}", format_customer_list(&customers));
            Ok(())
        }
        Commands::Export { format, output } => {
            let format = BackendKind::from_str(&format).map_err(SurveyError::Config)?;
            let (repo, config) = open_workspace()?;
            let service = ExportService::new(repo, config);
            let summary = service.execute(format, output.as_deref())?;
            println!(
                "Exported {} customers to {}",
                summary.records,
                summary.path.display()
            );
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let (repo, config) = open_workspace()?;
            let mut service = ConfigService::new(repo, config);

            if list {
                let config = service.list();
                println!("backend = {}", config.backend);
                println!("data_file = {}", config.data_file);
                println!(
                    "log_level = {}",
                    config.log_level.as_deref().unwrap_or("info")
                );
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: survey config [--list | <key> [<value>]]");
                println!("Valid keys: backend, data_file, log_level");
                Ok(())
            }
        }
    }
}
