use dotenvy::dotenv;
use jewellery_estimate::{
    config::{database, shop},
    core::{
        document::EstimateDocument,
        draft::load_draft,
        form::EstimateForm,
        numbering::{ESTIMATE_SEQUENCE, EstimateSequence, StoredSequence, format_estimate_number, today},
    },
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Load .env file first so RUST_LOG and DATABASE_URL can come from it
    dotenv().ok();

    // 2. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 3. Load shop settings (defaults when no file exists)
    let config = shop::load_app_config()?;

    // 4. Load the draft and replay it onto a form before touching the counter,
    //    so a bad draft never burns an estimate number
    let draft_path = env::args().nth(1).ok_or_else(|| Error::Config {
        message: "usage: jewellery-estimate <draft.toml>".to_string(),
    })?;
    let draft = load_draft(&draft_path).inspect_err(|e| error!("{}", e))?;

    let mut form = EstimateForm::new(config.row_limits());
    form.apply_draft(&draft)
        .inspect_err(|e| error!("Draft {} rejected: {}", draft_path, e))?;

    // 5. Open the counter database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to open database: {}", e))?;
    database::create_tables(&db).await?;

    // 6. Mint the estimate number and print
    let mut sequence = StoredSequence::new(db, ESTIMATE_SEQUENCE);
    let number = format_estimate_number(
        &config.estimate.number_prefix,
        config.estimate.number_width,
        sequence.next().await?,
    );
    info!("Printing estimate {}", number);

    let document = EstimateDocument::build(&form, number, today());
    print!("{}", document.render(&config));

    Ok(())
}
