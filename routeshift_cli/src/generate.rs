use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use routeshift::json::schema::{SchemaKind, generate_json_schema};
use tracing::info;

#[derive(Clone, Copy, ValueEnum)]
pub enum SchemaArg {
    Input,
    Payload,
}

impl From<SchemaArg> for SchemaKind {
    fn from(value: SchemaArg) -> Self {
        match value {
            SchemaArg::Input => SchemaKind::Input,
            SchemaArg::Payload => SchemaKind::Payload,
        }
    }
}

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    JsonSchema {
        /// Document to describe
        #[arg(long, value_enum, default_value = "input")]
        kind: SchemaArg,

        /// Output .json file
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { kind, out } => {
            let schema = generate_json_schema(kind.into())?;

            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(&out, schema)?;
            info!("Wrote JSON schema to {}", out.display());
        }
    }

    Ok(())
}
