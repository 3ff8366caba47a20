use clap::{Subcommand, ValueEnum};

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite a report event against an extended field catalog
    Rewrite {
        #[arg(long, help = "Field catalog file path (JSON array of field definitions)")]
        catalog: String,

        #[arg(long, help = "Report event file path (JSON)")]
        event: String,

        #[arg(long, help = "Rewriter settings file path")]
        settings: Option<String>,

        #[arg(long, value_enum, default_value_t = DialectKind::MySql)]
        dialect: DialectKind,

        #[arg(
            long,
            help = "If set, prints the rewritten event and outcome as JSON instead of SQL"
        )]
        json: bool,
    },
    /// List the attribute table each catalog field is stored in
    Tables {
        #[arg(long, help = "Field catalog file path (JSON array of field definitions)")]
        catalog: String,

        #[arg(long, help = "Rewriter settings file path")]
        settings: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectKind {
    #[value(name = "mysql")]
    MySql,
    #[value(name = "postgres", alias = "pg")]
    Postgres,
}
