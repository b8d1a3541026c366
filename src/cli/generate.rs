use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use super::commands::GenerateArgs;
use crate::errors::VexError;
use crate::generator::{Generator, GeneratorOpts, Hints};
use crate::llm;
use crate::output::{OpenvexHandler, OutputHandler, TrivyignoreHandler};
use crate::report::Report;

fn resolve_output_format(format: &str, output_path: &str) -> Result<String, VexError> {
    let resolved = match format {
        "" | "auto" => {
            let f = if output_path.contains("trivyignore") {
                "trivyignore"
            } else {
                "openvex"
            };
            debug!(format = f, "Automatically choosing output format");
            f
        }
        other => other,
    };
    match resolved {
        "openvex" | "trivyignore" => Ok(resolved.to_string()),
        other => Err(VexError::Config(format!("unknown output format {:?}", other))),
    }
}

pub async fn handle_generate(args: GenerateArgs) -> Result<(), VexError> {
    match args.input_format.as_str() {
        "" | "auto" | "trivy" => {}
        other => {
            return Err(VexError::Config(format!("unknown input format {:?}", other)));
        }
    }

    let input = tokio::fs::read_to_string(&args.input).await?;
    let report = Report::from_json(&input)?;
    let vulns = report.vulnerabilities();
    info!(
        input = %args.input,
        artifact = %report.artifact_name,
        vulnerabilities = vulns.len(),
        "Loaded scan report"
    );

    let output_format = resolve_output_format(&args.output_format, &args.output)?;
    let file = std::fs::File::create(&args.output)?;
    let mut handler: Box<dyn OutputHandler> = match output_format.as_str() {
        "trivyignore" => Box::new(TrivyignoreHandler::new(file)),
        _ => Box::new(OpenvexHandler::new(file)),
    };

    let provider = llm::create_provider(
        &args.llm,
        args.llm_model.as_deref(),
        args.llm_base_url.as_deref(),
    )?;

    let mut hints = Hints {
        descriptions: vec![
            format!("Artifact type: {:?}", report.artifact_type),
            format!("Artifact name: {:?}", report.artifact_name),
        ],
        container: args.hint_container || report.artifact_type == "container_image",
        not_server: args.hint_not_server,
        used_commands: args.hint_used_commands,
        unused_commands: args.hint_unused_commands,
        compromise_on_availability: args.hint_compromise_on_availability,
    };
    hints.descriptions.extend(args.hints);

    let generator = Generator::new(GeneratorOpts {
        llm: Some(Arc::from(provider)),
        temperature: args.llm_temperature,
        batch_size: args.llm_batch_size,
        seed: args.llm_seed,
        hints,
        debug_dir: args.debug_dir.map(PathBuf::from),
        ..Default::default()
    })?;

    let mut total = 0usize;
    generator
        .generate_statements(&vulns, |stmts| {
            total += stmts.len();
            handler.handle_statements(stmts)
        })
        .await?;
    handler.close()?;

    info!(statements = total, output = %args.output, "Wrote VEX output");
    Ok(())
}
