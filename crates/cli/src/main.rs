use clap::{Parser, Subcommand};
use ptb_core::{
    CallerIdentity, ClassificationWorkflow, CoreConfig, ExternalClassifier, FeatureVector,
    PredictionSession,
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ptb")]
#[command(about = "Preterm birth classification CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a patient and show the stored clinical values
    Lookup {
        /// Integer patient ID
        patient_id: String,
    },
    /// Classify a patient with the gestation threshold and record the result
    Predict {
        /// Integer patient ID
        patient_id: String,
        /// Form value as field=value (repeatable), e.g. --input gestation=38
        #[arg(long = "input", value_parser = parse_key_val)]
        inputs: Vec<(String, String)>,
        /// Clinician recorded against the prediction
        #[arg(long)]
        clinician: String,
    },
    /// Show the most recent predictions, newest first
    History {
        /// Number of records to show (defaults to PTB_RECENT_LIMIT)
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Run the external classifier on a stored patient's features
    ClassifyExternal {
        /// Integer patient ID
        patient_id: String,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{}'", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'ptb --help' for commands");
        return Ok(());
    };

    let cfg = CoreConfig::from_env()?;
    let workflow = ptb_core::workflow_from_config(&cfg).await?;

    match command {
        Commands::Lookup { patient_id } => match workflow.lookup_patient(&patient_id).await {
            Ok(patient) => {
                println!("Patient {}: {}", patient.patient_id, patient.patient_name);
                for field in ptb_core::patient::EDITABLE_FIELDS {
                    if let Some(value) = patient.field_value(field) {
                        println!("  {:<26} {}", field, value);
                    }
                }
            }
            Err(e) => eprintln!("{}", e),
        },
        Commands::Predict {
            patient_id,
            inputs,
            clinician,
        } => {
            let caller = CallerIdentity::new(&clinician)?;
            let mut session = PredictionSession::new(Arc::new(workflow), caller);

            if session.search(&patient_id).await.is_err() {
                eprintln!("{}", session.error().unwrap_or_default());
                return Ok(());
            }
            for (field, value) in inputs {
                if let Err(e) = session.set_input(&field, value) {
                    eprintln!("{}", e);
                    return Ok(());
                }
            }

            match session.submit().await {
                Ok(label) => {
                    println!("Prediction: {}", label);
                    if let Some(warning) = session.error() {
                        eprintln!("{}", warning);
                    }
                    print_recent(session.recent());
                }
                Err(e) => eprintln!("{}", e),
            }
        }
        Commands::History { limit } => {
            let limit = limit
                .unwrap_or_else(|| workflow.recent_limit())
                .min(ptb_core::constants::MAX_RECENT_LIMIT);
            match workflow.fetch_recent_predictions(limit).await {
                Ok(records) if records.is_empty() => println!("No predictions recorded."),
                Ok(records) => print_recent(&records),
                Err(e) => {
                    eprintln!("{}: {}", ptb_core::constants::FETCH_FAILED_MESSAGE, e)
                }
            }
        }
        Commands::ClassifyExternal { patient_id } => {
            classify_external(&workflow, &cfg, &patient_id).await;
        }
    }

    Ok(())
}

async fn classify_external(workflow: &ClassificationWorkflow, cfg: &CoreConfig, raw_id: &str) {
    let patient = match workflow.lookup_patient(raw_id).await {
        Ok(patient) => patient,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let classifier = ExternalClassifier::new(cfg.classifier().clone());
    match classifier.classify(&FeatureVector::from(&patient)).await {
        Ok(prediction) => println!("Prediction: {}", prediction),
        Err(e) => eprintln!("{}: {}", ptb_core::constants::CLASSIFIER_FAILED_MESSAGE, e),
    }
}

fn print_recent(records: &[ptb_core::PredictionRecord]) {
    for r in records {
        println!(
            "{}  {}  {:<24} {:<8} {}",
            r.prediction_id,
            r.patient_id,
            r.patient_name,
            r.prediction_result,
            r.prediction_date.to_rfc3339()
        );
    }
}
