use crate::aggregator::TotalsPolicy;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Arguments for the times command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TimesArgs {
    /// Root of the per-pair pipeline output
    pub folddock_output_dir: PathBuf,

    /// Root of the per-protein MSA output
    pub msa_output_dir: PathBuf,

    /// Interactions list, one `protein1 protein2` per line
    pub interactions_file: PathBuf,

    /// Output path for the TSV report
    pub output_file: PathBuf,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// How derived totals treat missing stages
    pub totals_policy: TotalsPolicy,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for TimesArgs {
    fn default() -> Self {
        Self {
            folddock_output_dir: PathBuf::from("folddock_output"),
            msa_output_dir: PathBuf::from("msa_output"),
            interactions_file: PathBuf::from("interactions.txt"),
            output_file: PathBuf::from("resource_usage.tsv"),
            output_json: None,
            totals_policy: TotalsPolicy::default(),
            print_summary: false,
        }
    }
}

/// Arguments for the completed command
#[derive(Debug, Clone)]
pub struct CompletedArgs {
    /// Root of the per-pair pipeline output
    pub output_dir: PathBuf,

    /// Interactions list
    pub interactions_file: PathBuf,

    /// Where to write the finished interactions
    pub output_file: PathBuf,
}

impl Default for CompletedArgs {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("folddock_output"),
            interactions_file: PathBuf::from("interactions.txt"),
            output_file: PathBuf::from("completed.txt"),
        }
    }
}

/// Arguments for the split command
#[derive(Debug, Clone)]
pub struct SplitArgs {
    /// Root of the per-pair pipeline output
    pub folddock_output_dir: PathBuf,

    /// Interactions list
    pub interactions_file: PathBuf,

    /// Existing directory receiving the per-chain files
    pub output_dir: PathBuf,
}

impl Default for SplitArgs {
    fn default() -> Self {
        Self {
            folddock_output_dir: PathBuf::from("folddock_output"),
            interactions_file: PathBuf::from("interactions.txt"),
            output_dir: PathBuf::from("chains"),
        }
    }
}

/// Validate times arguments
///
/// **Public** - can be called before execute_times for early validation
pub fn validate_times_args(args: &TimesArgs) -> Result<()> {
    require_dir(&args.folddock_output_dir, "FoldDock output directory")?;
    require_dir(&args.msa_output_dir, "MSA output directory")?;
    require_file(&args.interactions_file, "Interactions file")?;
    require_output(&args.output_file)?;
    if let Some(json) = &args.output_json {
        require_output(json)?;
    }
    Ok(())
}

/// Validate completed arguments
pub fn validate_completed_args(args: &CompletedArgs) -> Result<()> {
    require_dir(&args.output_dir, "Output directory")?;
    require_file(&args.interactions_file, "Interactions file")?;
    require_output(&args.output_file)
}

/// Validate split arguments
pub fn validate_split_args(args: &SplitArgs) -> Result<()> {
    require_dir(&args.folddock_output_dir, "FoldDock output directory")?;
    require_file(&args.interactions_file, "Interactions file")?;
    require_dir(&args.output_dir, "Output directory")
}

fn require_dir(path: &Path, what: &str) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("{} is not a directory: {}", what, path.display());
    }
    Ok(())
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!("{} is not a file: {}", what, path.display());
    }
    Ok(())
}

fn require_output(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }
    if path.is_dir() {
        anyhow::bail!("Output path is a directory: {}", path.display());
    }
    Ok(())
}
