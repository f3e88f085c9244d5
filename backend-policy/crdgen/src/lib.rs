#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use backend_policy_k8s_api::{BackendPolicy, CustomResourceExt};
use clap::Parser;
use std::{fmt, io::Write, path::PathBuf, str::FromStr};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[clap(
    name = "backend-policy-crdgen",
    about = "Renders the BackendPolicy CustomResourceDefinition"
)]
pub struct Args {
    #[clap(
        long,
        default_value = "backend_policy_crdgen=info,warn",
        env = "BACKEND_POLICY_CRDGEN_LOG"
    )]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain", env = "BACKEND_POLICY_CRDGEN_LOG_FORMAT")]
    log_format: kubert::LogFormat,

    /// Manifest encoding: `yaml` or `json`.
    #[clap(long, default_value = "yaml")]
    format: Format,

    /// Writes the manifest to a file instead of stdout.
    #[clap(long, short)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported format {0:?}: expected one of 'yaml' or 'json'")]
pub struct FormatParseError(String);

// === impl Args ===

impl Args {
    #[inline]
    pub fn parse_and_run() -> Result<()> {
        Self::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let Self {
            log_level,
            log_format,
            format,
            output,
        } = self;

        log_format
            .try_init(log_level)
            .context("failed to initialize logging")?;

        let manifest = render(format)?;
        match output {
            Some(path) => {
                std::fs::write(&path, &manifest)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), %format, "Wrote CRD");
            }
            None => {
                std::io::stdout()
                    .lock()
                    .write_all(manifest.as_bytes())
                    .context("failed to write CRD to stdout")?;
            }
        }

        Ok(())
    }
}

/// Renders the BackendPolicy CRD manifest.
pub fn render(format: Format) -> Result<String> {
    let crd = BackendPolicy::crd();
    // Only debug-level events are emitted while the manifest may be going to
    // stdout.
    debug!(name = ?crd.metadata.name, %format, "Rendering CRD");

    match format {
        Format::Yaml => serde_yaml::to_string(&crd).context("failed to encode CRD as YAML"),
        Format::Json => {
            let mut json =
                serde_json::to_string_pretty(&crd).context("failed to encode CRD as JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

// === impl Format ===

impl FromStr for Format {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("yaml") || s.eq_ignore_ascii_case("yml") {
            return Ok(Self::Yaml);
        }
        if s.eq_ignore_ascii_case("json") {
            return Ok(Self::Json);
        }
        Err(FormatParseError(s.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => f.write_str("yaml"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats() {
        assert_eq!("yaml".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("YML".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        let err = "toml".parse::<Format>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported format \"toml\": expected one of 'yaml' or 'json'"
        );
    }

    #[test]
    fn parses_args() {
        let args = Args::try_parse_from(["backend-policy-crdgen"]).unwrap();
        assert_eq!(args.format, Format::Yaml);
        assert_eq!(args.output, None);

        let args =
            Args::try_parse_from(["backend-policy-crdgen", "--format", "json", "-o", "crd.json"])
                .unwrap();
        assert_eq!(args.format, Format::Json);
        assert_eq!(args.output, Some(PathBuf::from("crd.json")));

        assert!(Args::try_parse_from(["backend-policy-crdgen", "--format", "toml"]).is_err());
    }

    #[test]
    fn default_log_settings() {
        use clap::CommandFactory;

        let cmd = Args::command();
        let default = |id: &str| {
            let arg = cmd
                .get_arguments()
                .find(|a| a.get_id() == id)
                .unwrap_or_else(|| panic!("missing {id}"));
            arg.get_default_values()
                .iter()
                .map(|v| v.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
        };
        assert_eq!(default("log_level"), ["backend_policy_crdgen=info,warn"]);
        assert_eq!(default("log_format"), ["plain"]);
    }

    #[test]
    fn renders_yaml() {
        let manifest = render(Format::Yaml).unwrap();
        let crd: serde_yaml::Value = serde_yaml::from_str(&manifest).unwrap();
        assert_eq!(crd["apiVersion"].as_str(), Some("apiextensions.k8s.io/v1"));
        assert_eq!(crd["kind"].as_str(), Some("CustomResourceDefinition"));
        assert_eq!(
            crd["metadata"]["name"].as_str(),
            Some("backendpolicies.networking.x-k8s.io")
        );
    }

    #[test]
    fn renders_json() {
        let manifest = render(Format::Json).unwrap();
        assert!(manifest.ends_with('\n'));
        let crd: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(crd["spec"]["names"]["kind"], "BackendPolicy");
        assert_eq!(crd["spec"]["versions"][0]["name"], "v1alpha1");
    }

    #[test]
    fn rejects_invalid_log_settings() {
        assert!(
            Args::try_parse_from(["backend-policy-crdgen", "--log-level", "x=loud"]).is_err()
        );
        assert!(
            Args::try_parse_from(["backend-policy-crdgen", "--log-format", "xml"]).is_err()
        );
        assert!(Args::try_parse_from([
            "backend-policy-crdgen",
            "--log-level",
            "backend_policy_crdgen=debug",
            "--log-format",
            "json",
        ])
        .is_ok());
    }
}
