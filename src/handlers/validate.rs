use crate::{
    analyzer::{
        self, ExclusionResolver, Outcome, ScanConfig, ValidateOptions,
        exclusions::parse_scoped_json, formatter::format_report,
    },
    cli::Cli,
    config::{self, types::Config},
};
use std::io::IsTerminal;

/// Merge CLI arguments over the loaded configuration into one options object.
///
/// Exclusion lists are additive; scalar settings from the CLI override the config.
pub fn build_options(cli: &Cli, config: &Config) -> crate::Result<ValidateOptions> {
    let mut global = config.exclusions.global.clone();
    global.extend(cli.exclude.iter().cloned());

    let sidecar = cli
        .except_file_name
        .clone()
        .or_else(|| config.scan.except_file_name.clone());

    let mut exclusions = ExclusionResolver::new(
        global,
        config
            .exclusions
            .directories
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
        sidecar,
    );
    if let Some(json) = &cli.exclude_json {
        for (key, names) in parse_scoped_json(json)? {
            exclusions.add_scoped(&key, names);
        }
    }

    let scan = ScanConfig {
        extensions: if cli.extensions.is_empty() {
            config.scan.extensions.clone()
        } else {
            cli.extensions.clone()
        },
        file_name: cli.file_name.clone().or_else(|| config.scan.file_name.clone()),
        ignore_dirs: config.scan.ignore_dirs.clone(),
    };

    Ok(ValidateOptions {
        dockerfile_path: cli.dockerfile_path.clone(),
        terraform_dir: cli.terraform_dir.clone(),
        strategy: cli.strategy.unwrap_or(config.matching.strategy),
        granularity: cli.granularity.unwrap_or(config.matching.granularity),
        scan,
        exclusions,
    })
}

/// Run a validation from parsed CLI arguments and print the report.
pub fn handle_validate(cli: &Cli) -> crate::Result<Outcome> {
    let config = config::load_config(cli.config.as_deref(), Some(cli.terraform_dir.as_path()))?;
    let options = build_options(cli, &config)?;

    log::info!(
        "Validating {} against {}",
        options.dockerfile_path.display(),
        options.terraform_dir.display()
    );

    let report = analyzer::validate(&options)?;

    let format = cli.format.unwrap_or(config.output.format);
    let grouping = cli
        .group_by
        .or(config.output.group_by)
        .unwrap_or_else(|| options.granularity.default_grouping());

    if format.is_machine_readable() {
        print!("{}", format_report(&report, format, grouping, false));
    } else {
        let colors = std::io::stderr().is_terminal();
        eprint!("{}", format_report(&report, format, grouping, colors));
    }

    Ok(report.outcome())
}
