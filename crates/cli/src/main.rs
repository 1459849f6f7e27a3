use std::io::{stdin, stdout, StdinLock, Stdout};
use std::process::ExitCode;

use autorun_cli::arguments::validation::should_prompt_for_parameters;
use autorun_cli::arguments::{process_command_line, Provider, Style};
use autorun_cli::automation_selection::{
    confirm_automation_should_run, fill_parameter_values, prompt_for_automation_choice,
    AutomationChoice, RunChoice, TerminalView,
};
use autorun_cli::cli_args::Args;
use autorun_core::api::HttpApi;
use autorun_core::config::{self, Settings};
use autorun_core::controller::AutomationController;
use autorun_core::error::{Error, Result};
use autorun_core::outcome::{plain_text, ExecutionResult};
use autorun_core::session::{self, CatalogAccess, CredentialStore, FileCredentialStore};
use autorun_core::task::{self, TaskStatus};
use clap::Parser;
use log::{debug, info};

type Controller = AutomationController<HttpApi, TerminalView<Stdout>>;

/// Load settings and apply command-line overrides
fn initialize_settings(args: &Args) -> Result<Settings> {
    let settings_path = config::get_settings_path(args.config_path.as_deref());
    debug!("Settings path: `{settings_path}`");

    let mut settings = config::load_settings(&settings_path)?;
    if let Some(base_url) = &args.base_url {
        settings.base_url.clone_from(base_url);
    }
    info!("Using automation server at `{}`", settings.base_url);

    Ok(settings)
}

/// Handle the token management flags. Returns whether one was given.
fn manage_credentials(args: &Args) -> Result<bool> {
    let credentials_path = config::get_credentials_path(args.credentials_path.as_deref());
    let mut store = FileCredentialStore::new(credentials_path);

    if let Some(token) = &args.save_token {
        store.save_token(token)?;
        println!("Token saved to `{}`.", store.path());
        return Ok(true);
    }

    if args.clear_token {
        store.clear()?;
        println!("Token removed from `{}`.", store.path());
        return Ok(true);
    }

    Ok(false)
}

fn check_health(settings: Settings) -> Result<ExitCode> {
    let health = HttpApi::new(settings).health()?;

    println!("Server status: {}", plain_text(&health.status));
    if let Some(timestamp) = &health.timestamp {
        println!("Timestamp: {}", plain_text(timestamp));
    }
    if let Some(auth_method) = &health.auth_method {
        println!("Authentication: {}", plain_text(auth_method));
    }

    Ok(if health.status == "healthy" {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// An API that sends the stored token, if there is one
fn task_api(args: &Args, settings: Settings) -> Result<HttpApi> {
    let credentials_path = config::get_credentials_path(args.credentials_path.as_deref());
    let store = FileCredentialStore::new(credentials_path);

    let api = HttpApi::new(settings);
    Ok(match store.load_token()? {
        Some(token) => api.with_bearer(token),
        None => api,
    })
}

fn print_task_status(task_arn: &str, status: &TaskStatus) {
    println!("Task: {}", plain_text(task_arn));
    if !status.status.is_empty() {
        println!("Status: {}", plain_text(&status.status));
    }
    let details = [
        ("Desired status", &status.desired_status),
        ("Started", &status.started_at),
        ("Stopped", &status.stopped_at),
        ("Stop reason", &status.stop_reason),
        ("Error", &status.error),
    ];
    for (heading, value) in details {
        if let Some(value) = value {
            println!("{heading}: {}", plain_text(value));
        }
    }
    if let Some(exit_code) = status.exit_code {
        println!("Exit code: {exit_code}");
    }
}

fn follow_task(args: &Args, settings: Settings, task_arn: &str) -> Result<ExitCode> {
    let api = task_api(args, settings)?;

    let status = if args.wait {
        println!("Waiting for task to finish...");
        task::wait_for_completion(
            || api.task_status(task_arn),
            task::DEFAULT_POLL_INTERVAL,
            task::DEFAULT_WAIT_TIMEOUT,
        )?
    } else {
        api.task_status(task_arn)?
    };
    print_task_status(task_arn, &status);

    let failed = status.error.is_some()
        || status.exit_code.is_some_and(|code| code != 0)
        || status.status == task::TIMEOUT_STATUS;
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn stop_task(args: &Args, settings: Settings, task_arn: &str) -> Result<ExitCode> {
    let outcome = task_api(args, settings)?.stop_task(task_arn)?;

    if outcome.is_success() {
        println!("Stop requested for task {}", plain_text(task_arn));
        return Ok(ExitCode::SUCCESS);
    }

    let reason = outcome.error.as_deref().unwrap_or("no reason given");
    eprintln!("Could not stop task: {}", plain_text(reason));
    Ok(ExitCode::FAILURE)
}

fn show_authenticated_catalog(args: &Args, settings: &Settings) -> Result<ExitCode> {
    let credentials_path = config::get_credentials_path(args.credentials_path.as_deref());
    let mut store = FileCredentialStore::new(credentials_path);
    let mut view = TerminalView::new(stdout());

    let access = session::show_read_only_catalog(
        &mut store,
        |token| HttpApi::new(settings.clone()).with_bearer(token),
        &settings.login_url(),
        &mut view,
    )?;
    debug!("Read-only catalog: {access:?}");

    Ok(match access {
        CatalogAccess::Listed(_) => ExitCode::SUCCESS,
        CatalogAccess::LoginRequired | CatalogAccess::Failed => ExitCode::FAILURE,
    })
}

/// Select the automation given on the command line or chosen interactively.
/// Returns false if the user quit.
fn select_automation(
    args: &Args,
    controller: &mut Controller,
    input: &mut StdinLock<'_>,
) -> Result<bool> {
    let choice = match &args.automation_id_or_index {
        Some(argument) => AutomationChoice::from_argument(argument),
        None => prompt_for_automation_choice(controller.catalog(), input, &mut stdout())?,
    };

    let automation_id = match choice {
        AutomationChoice::Quit => return Ok(false),
        AutomationChoice::AutomationId(id) => id,
        AutomationChoice::Index(index) => controller
            .catalog()
            .automations()
            .get(index)
            .map(|automation| automation.id.clone())
            .ok_or_else(|| Error::UnknownAutomation((index + 1).to_string()))?,
    };

    controller.select(&automation_id);
    if controller.selected().is_none() {
        return Err(Error::UnknownAutomation(automation_id));
    }

    Ok(true)
}

/// Handle parameter input, confirmation and the run itself
fn fill_confirm_and_run(
    args: &Args,
    argument_style: &Style,
    controller: &mut Controller,
    input: &mut StdinLock<'_>,
) -> Result<ExitCode> {
    let provided = process_command_line(argument_style, controller.form_mut())?;

    let mut need_to_prompt =
        should_prompt_for_parameters(controller.form(), &provided, argument_style);
    let mut only_invalid = false;

    loop {
        if need_to_prompt {
            fill_parameter_values(controller.form_mut(), only_invalid, input, &mut stdout())?;
            need_to_prompt = false;
        }

        if !args.dry_run && !args.force {
            let has_params = !controller.form().is_empty();
            match confirm_automation_should_run(has_params, input, &mut stdout())? {
                RunChoice::Yes => {}
                RunChoice::No => {
                    info!("Run cancelled by user");
                    return Ok(ExitCode::SUCCESS);
                }
                RunChoice::ChangeParams => {
                    need_to_prompt = true;
                    only_invalid = false;
                    continue;
                }
            }
        }

        let outcome = if args.dry_run {
            controller.prepare_request().and_then(|request| {
                println!("{}", serde_json::to_string_pretty(&request)?);
                println!("Dry run is specified, exiting without running.");
                Ok(ExitCode::SUCCESS)
            })
        } else {
            controller.run().map(|result| {
                if let ExecutionResult::Success {
                    task: Some(launched),
                    ..
                } = &result
                {
                    println!(
                        "Follow it with: autorun --task-status {} --wait",
                        plain_text(&launched.task_arn)
                    );
                }
                if result.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            })
        };

        match outcome {
            Ok(exit_code) => return Ok(exit_code),
            // The view has already shown the validation message
            Err(Error::Validation { .. }) if args.force || args.dry_run => {
                return Ok(ExitCode::FAILURE)
            }
            // Ask again for just the missing values
            Err(Error::Validation { .. }) => {
                need_to_prompt = true;
                only_invalid = true;
            }
            Err(e) => return Err(e),
        }
    }
}

fn execute() -> Result<ExitCode> {
    let args = Args::parse();

    if manage_credentials(&args)? {
        return Ok(ExitCode::SUCCESS);
    }

    let settings = initialize_settings(&args)?;

    if args.health {
        return check_health(settings);
    }

    if let Some(task_arn) = &args.task_status {
        return follow_task(&args, settings, task_arn);
    }

    if let Some(task_arn) = &args.stop_task {
        return stop_task(&args, settings, task_arn);
    }

    if args.authenticated {
        return show_authenticated_catalog(&args, &settings);
    }

    // Malformed values are reported before the catalog is fetched
    let argument_style = args.get_style()?;

    let mut controller = AutomationController::new(HttpApi::new(settings), TerminalView::new(stdout()));
    if !controller.start() {
        return Ok(ExitCode::FAILURE);
    }

    let mut input = stdin().lock();

    if !select_automation(&args, &mut controller, &mut input)? {
        return Ok(ExitCode::SUCCESS);
    }

    fill_confirm_and_run(&args, &argument_style, &mut controller, &mut input)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
