mod host;

use std::process::ExitCode;

use anyhow::Context;
use ballast_codemod::ServiceTypeModifier;
use ballast_db::RootDatabase;
use ballast_errors::Renderer;
use ballast_project::{Compilation, ModifierTask as _, SourceSet, load_package};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use host::CollectingHost;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(version, about = "Adds `@http:ServiceConfig {serviceType: T}` to typed services")]
enum Options {
    /// Print the diagnostics of a package.
    Check { path: Utf8PathBuf },
    /// Annotate typed services and write the changed documents back.
    Modify {
        path: Utf8PathBuf,
        /// Report what would change without writing anything.
        #[arg(long)]
        dry_run: bool,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    package: &'a str,
    dry_run: bool,
    changed: Vec<ChangedDocument<'a>>,
}

#[derive(Serialize)]
struct ChangedDocument<'a> {
    path: &'a str,
    module: &'a str,
    source_set: SourceSet,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,ballast=info,ballast_project=info,ballast_codemod=info")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_logging();

    match Options::parse() {
        Options::Check { path } => {
            let db = RootDatabase::default();
            let compilation = Compilation::new(&db, load_package(&db, &path)?);
            print_diagnostics(&db, &compilation);

            Ok(if compilation.has_errors() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
        Options::Modify { path, dry_run, format } => {
            let db = RootDatabase::default();
            let compilation = Compilation::new(&db, load_package(&db, &path)?);
            if compilation.has_errors() {
                print_diagnostics(&db, &compilation);
            }
            let failed = compilation.has_errors();

            let mut host = CollectingHost::new(compilation);
            ServiceTypeModifier.modify(&db, &mut host);
            let (compilation, pending) = host.into_parts();
            let package = compilation.package();

            let mut changed = Vec::new();
            for edit in &pending {
                let document = package.document(edit.document);
                if document.file().text(&db) == edit.text {
                    continue;
                }

                let path = document.path(&db);
                if !dry_run {
                    std::fs::write(path, &edit.text)
                        .with_context(|| format!("failed to write `{path}`"))?;
                    info!(%path, "annotated services");
                }
                changed.push(ChangedDocument {
                    path: path.as_str(),
                    module: package.module(edit.module).name(),
                    source_set: edit.source_set,
                });
            }

            match format {
                Format::Text => {
                    for document in &changed {
                        println!("{}", document.path);
                    }
                }
                Format::Json => {
                    let report = Report { package: package.name(), dry_run, changed };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }

            Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
    }
}

fn print_diagnostics(db: &RootDatabase, compilation: &Compilation) {
    let renderer = Renderer::styled();
    let package = compilation.package();

    for entry in compilation.document_diagnostics() {
        let document = package.document(entry.document);
        let path = document.path(db).as_str();
        let text = document.file().text(db);
        eprintln!("{}", entry.diagnostic.render(&renderer, path, text));
    }
}
