use anyhow::{Context, Result};
use log::info;

use parser::{BuildAncestorsArgs, Cli, Commands, ThreadArgs};

mod io;

/// Dispatch a parsed [`Cli`] invocation. Mirrors `Cli::serialize`/`FromYaml`
/// so a run can be replayed exactly from its echoed `.yaml` file.
pub fn run(cli: Cli) -> Result<()> {
    match &cli.commands {
        Commands::BuildAncestors { common, build } => build_ancestors(&common.output_dir, build),
        Commands::Thread { common, thread } => thread(&common.output_dir, thread),
        Commands::FromYaml { yaml } => {
            let cli = Cli::deserialize(yaml).context("failed to replay serialized run")?;
            run(cli)
        }
    }
}

fn build_ancestors(output_dir: &std::path::Path, args: &BuildAncestorsArgs) -> Result<()> {
    let records = io::read_genotypes(&args.genotypes)?;
    let num_sites = records.len() as u32;

    let arena = arena::BlockAllocator::new(1 << 20);
    let mut builder = ancestors::Builder::init(&arena, args.num_samples, num_sites, 0)
        .context("failed to initialize ancestor builder")?;

    for record in &records {
        builder
            .add_site(record.site_id, record.frequency, &record.genotypes)
            .with_context(|| format!("failed to register site {}", record.site_id))?;
    }
    builder.finalise().context("failed to finalise site registration")?;

    let descriptors = builder.descriptors();
    info!("synthesizing {} ancestors", descriptors.len());

    let mut lines = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let mut out = vec![0i8; num_sites as usize];
        let focal_sites: Vec<u32> = descriptor.focal_sites.iter().map(|s| s.get()).collect();
        let (start, end) = builder
            .make_ancestor(&focal_sites, &mut out)
            .context("failed to synthesize ancestor")?;
        let alleles = out.iter().map(i8::to_string).collect::<Vec<_>>().join(" ");
        lines.push(format!("{start} {end} {alleles}"));
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    io::write_lines(&args.out, lines)
}

fn thread(output_dir: &std::path::Path, args: &ThreadArgs) -> Result<()> {
    let (haplotypes, num_haplotypes, num_sites) = io::read_panel_matrix(&args.panel)?;
    let positions = io::read_positions(&args.positions)?;

    let panel = refpanel::ReferencePanel::new(
        &haplotypes,
        num_haplotypes,
        num_sites,
        &positions,
        args.sequence_length,
    )
    .context("failed to build reference panel")?;

    let mut threader = threader::Threader::new(&panel).context("failed to allocate threader")?;
    let mut path = vec![0u32; num_sites as usize];
    let mutations = threader
        .run(
            args.haplotype_index,
            args.panel_size,
            args.recombination_rate,
            args.error_probability,
            &mut path,
            0,
        )
        .context("failed to thread haplotype")?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let path_line = path.iter().map(u32::to_string).collect::<Vec<_>>().join(" ");
    let mutation_line = mutations.iter().map(u32::to_string).collect::<Vec<_>>().join(" ");
    io::write_lines(&args.out, [path_line, mutation_line])
}
