use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "relchain",
    about = "relchain: validate relation chains, render join names, and carry bindings across sessions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report per-node flags and whether the relation is complete
    Check {
        /// Path to the relation definition (TOML)
        relation: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render node names, reference names and joins through the datasource
    Names {
        /// Path to the relation definition (TOML)
        relation: String,

        /// Qualify reference names with the node name
        #[arg(long)]
        qualify: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bind values, snapshot the relation, and store the snapshot in a session file
    Save {
        /// Path to the relation definition (TOML)
        relation: String,

        /// Session file (JSON)
        #[arg(long)]
        session: String,

        /// Session key prefix
        #[arg(long, default_value = "relchain")]
        key_prefix: String,

        /// Binding as INDEX:SIDE:V1,V2 (side: predecessor|successor)
        #[arg(long = "bind")]
        binds: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Restore a stored snapshot into the relation and print the bound values
    Restore {
        /// Path to the relation definition (TOML)
        relation: String,

        /// Session file (JSON)
        #[arg(long)]
        session: String,

        /// Session key prefix
        #[arg(long, default_value = "relchain")]
        key_prefix: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
