// godown-client/examples/stock_entry.rs
// End-to-end stock entry against a locally running backend: log in, load
// reference data, build a draft with two variants, submit it.
//
// Usage: cargo run --example stock_entry -- <username> <password>

use anyhow::{Context, Result};
use godown_client::catalog::{CatalogCache, ProductCache};
use godown_client::config::ClientConfig;
use godown_client::draft::ProductDraft;
use godown_client::session::{SessionStore, TokenStore};
use godown_client::submit::SubmissionPipeline;
use shared::models::Gender;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("godown_client=debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let username = args.next().context("usage: stock_entry <username> <password>")?;
    let password = args.next().context("usage: stock_entry <username> <password>")?;

    let config = ClientConfig::new("http://localhost:8080");
    let mut api = config.build_http_client();

    let token_dir = std::env::temp_dir().join("godown-example");
    let mut session = SessionStore::new(TokenStore::new(token_dir));

    // Try the stored token first, fall back to credentials.
    session.resolve(&mut api).await;
    if !session.is_authenticated() {
        let user = session.login(&mut api, &username, &password).await?;
        println!("logged in as {} ({})", user.username, user.role);
    }

    let mut catalog = CatalogCache::new();
    catalog.load_categories(&api).await?;
    catalog.load_brands(&api).await?;
    println!(
        "{} categories, {} brands",
        catalog.categories().len(),
        catalog.brands().len()
    );

    let mut draft = ProductDraft::new();
    draft.form.item_id = "DEMO-001".to_string();
    draft.form.item_name = "Demo Running Shoe".to_string();
    draft.form.model = "Roadster".to_string();
    if let Some(category) = catalog.categories().first() {
        draft.select_category(Some(category.id));
    }

    for (size, price) in [("8", "1999"), ("9", "1999.50")] {
        draft.variants.begin_add();
        let form = draft.variants.form_mut();
        form.gender = Gender::Unisex;
        form.size = size.to_string();
        form.selling_price = price.to_string();
        form.quantity = "10".to_string();
        draft.variants.commit()?;
    }

    let mut pipeline = SubmissionPipeline::new();
    let mut products = ProductCache::new();
    let created = pipeline
        .submit(&mut api, &mut session, &draft, &mut products)
        .await?;

    println!(
        "created product {} ({} variants), {} products listed",
        created.item_id,
        created.variants.len(),
        products.products().len()
    );
    Ok(())
}
