use std::env;
use std::io::Write;

use clap::Parser;
use log::{info, warn};

use rotascan_chem::{Coefficients, ParameterRegistry, ParametersError};
use rotascan_cif::{out_writer, read_cif_file};
use rotascan_rotamers::{apply_sweep, assign_connections, assign_hybridization, sweep_residues,
                        AngleGrid, Diagnostics, PotentialKind, RotamerError, SweepConfig};
use rotascan_structure::{ResidueKey, Structure, StructureError};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Samples side-chain rotamers of protein residues and writes a ranked
/// rotamer library as an augmented mmCIF file
/// say rotascan -h to see options
struct Args {
    /// input file in mmCIF format, possibly gzipped
    #[clap(short = 'i', long, required = true)]
    infile: String,
    /// output file name; the augmented mmCIF goes to stdout when absent
    #[clap(short = 'o', long, default_value = "")]
    outfile: String,
    /// residue to sample, given as CHAIN:SEQ or CHAIN:SEQ:ALT; may be repeated.
    /// All residues with rotatable bonds are sampled when absent
    #[clap(short = 't', long)]
    target: Vec<String>,
    /// scoring potential: hard_sphere, soft_sphere, lennard_jones, coulomb, h_bond or composite
    #[clap(short = 'p', long, default_value = "composite")]
    potential: String,
    /// comma-separated dihedral values in degrees, applied to every rotatable angle
    #[clap(long)]
    angles: Option<String>,
    /// sample every rotatable angle uniformly with this step, in degrees
    #[clap(long, default_value_t = 90.0)]
    angle_step: f64,
    /// keep only the best K rotamers of every residue
    #[clap(long)]
    top_rank: Option<usize>,
    /// atom-atom distance cutoff in Angstroms
    #[clap(short = 'c', long)]
    cutoff: Option<f64>,
    /// use the hydrogen atoms found in the input for hydrogen-bond geometry
    #[clap(short = 'H', long)]
    use_hydrogens: bool,
    /// force-field coefficient overrides, given as KEY=VAL[,KEY=VAL...]
    #[clap(long)]
    parameters: Option<String>,
    /// sweep residues in parallel, one worker per residue
    #[clap(long)]
    parallel: bool,
    /// be more verbose and log program actions on the screen
    #[clap(short = 'v', long)]
    verbose: bool,
}

/// Builds the parameter registry from the defaults and the command-line overrides.
fn configure(args: &Args) -> Result<ParameterRegistry, ParametersError> {
    let mut coefficients = Coefficients::default();
    if let Some(overrides) = &args.parameters { coefficients.apply_overrides(overrides)?; }
    if let Some(cutoff) = args.cutoff { coefficients.cutoff_atom = cutoff; }
    coefficients.validate()?;
    return Ok(ParameterRegistry::with_coefficients(coefficients));
}

/// Expands the angle options into a grid in radians.
fn angle_grid(args: &Args) -> Result<AngleGrid, ParametersError> {
    if let Some(list) = &args.angles {
        let mut values = vec![];
        for token in list.split(',') {
            let degrees: f64 = token.trim().parse().map_err(|_| ParametersError::BadParameterValue {
                key: "angles".to_string(), value: token.trim().to_string(),
            })?;
            values.push(degrees.to_radians());
        }
        return Ok(AngleGrid::with_default_values(values));
    }
    if args.angle_step <= 0.0 {
        return Err(ParametersError::BadParameterValue {
            key: "angle-step".to_string(), value: format!("{}", args.angle_step),
        });
    }
    return Ok(AngleGrid::from_step(args.angle_step.to_radians()));
}

/// Resolves the residues to be sampled.
///
/// Explicit ``CHAIN:SEQ[:ALT]`` selections are matched against the residues
/// found in the structure; without any selection, every residue with a
/// rotatable-bond entry becomes a target.
fn resolve_targets(args: &Args, strctr: &Structure, registry: &ParameterRegistry)
                   -> Result<Vec<ResidueKey>, ParametersError> {

    let all_keys = strctr.residue_keys();
    if args.target.is_empty() {
        let targets = all_keys.into_iter()
            .filter(|key| {
                strctr.residue_atoms(key).next()
                    .map(|a| registry.chi_definitions(&a.comp_id).is_some())
                    .unwrap_or(false)
            })
            .collect();
        return Ok(targets);
    }

    let mut targets = vec![];
    for selection in &args.target {
        let parts: Vec<&str> = selection.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(ParametersError::BadParameterValue {
                key: "target".to_string(), value: selection.clone(),
            });
        }
        let seq_id: i32 = parts[1].parse().map_err(|_| ParametersError::BadParameterValue {
            key: "target".to_string(), value: selection.clone(),
        })?;
        let matched: Vec<&ResidueKey> = all_keys.iter()
            .filter(|key| key.chain_id == parts[0] && key.seq_id == seq_id
                && parts.get(2).map(|alt| key.alt_loc == *alt).unwrap_or(true))
            .collect();
        if matched.is_empty() {
            warn!("no residue matches the selection '{}'", selection);
        }
        targets.extend(matched.into_iter().cloned());
    }
    return Ok(targets);
}

fn main() -> Result<(), RotamerError> {

    let args = Args::parse();
    if env::var("RUST_LOG").is_err() { env::set_var("RUST_LOG", "info") }
    if args.verbose { env::set_var("RUST_LOG", "debug"); }
    env_logger::init();

    // ---------- configuration must be sound before anything is computed
    let registry = configure(&args)?;
    let potential: PotentialKind = args.potential.parse()
        .map_err(|_| ParametersError::BadParameterValue {
            key: "potential".to_string(), value: args.potential.clone(),
        })?;
    let grid = angle_grid(&args)?;

    // ---------- load the structure and rebuild its covalent bond graph
    let blocks = read_cif_file(&args.infile).map_err(StructureError::from)?;
    if blocks.len() > 1 { warn!("{} extra data block(s) in {} skipped", blocks.len() - 1, args.infile); }
    let mut strctr = Structure::from_cif_data(&blocks[0])?;
    info!("{}: {} atoms in {} residues loaded", strctr.id_code(),
          strctr.count_atoms(), strctr.count_residues());

    let diagnostics = Diagnostics::new();
    assign_connections(&mut strctr, &registry, &diagnostics);
    assign_hybridization(&mut strctr, &registry);

    // ---------- tag the targets and their surroundings, then freeze and sweep
    let targets = resolve_targets(&args, &strctr, &registry)?;
    info!("{} residue(s) to sample", targets.len());
    strctr.mark_selection_around(&targets, registry.coefficients().cutoff_residue);

    let mut config = SweepConfig::new(grid, potential);
    config.top_rank = args.top_rank;
    config.hydrogens_present = args.use_hydrogens;
    let sweeps = sweep_residues(&strctr, &registry, &targets, &config, &diagnostics, args.parallel)?;

    let mut total = 0;
    for sweep in &sweeps {
        total += sweep.count_rotamers();
        apply_sweep(&mut strctr, sweep)?;
    }
    info!("{} rotamer(s) generated", total);
    diagnostics.log_summary();

    let mut writer = out_writer(&args.outfile).map_err(|e| StructureError::from(rotascan_cif::CifError::Io(e)))?;
    write!(writer, "{}", strctr.to_cif()).map_err(|e| StructureError::from(rotascan_cif::CifError::Io(e)))?;

    Ok(())
}
