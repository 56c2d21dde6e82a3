//! Print the OpenAPI document as JSON.

use std::io::Write;

use color_eyre::eyre::Result;
use ontara_gateway::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let document = ApiDoc::openapi().to_pretty_json()?;
    writeln!(std::io::stdout().lock(), "{document}")?;
    Ok(())
}
