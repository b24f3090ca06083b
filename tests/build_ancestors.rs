mod common;
use common::run_cli;

#[test]
fn build_ancestors_cli_writes_the_two_strike_eviction_result() {
    let dir = tempfile::tempdir().unwrap();
    let genotypes = dir.path().join("genotypes.tsv");
    let out = dir.path().join("ancestors.tsv");

    // Same matrix as the two-strike eviction unit test in the ancestors
    // crate: 4 samples, 4 sites, focal site 0 at frequency 3.
    std::fs::write(
        &genotypes,
        "0 3 1 1 1 0\n\
         1 4 1 1 0 1\n\
         2 4 1 1 0 1\n\
         3 4 0 0 1 1\n",
    )
    .unwrap();

    run_cli(&[
        "ancestral-rs",
        "build-ancestors",
        "--output-dir",
        dir.path().to_str().unwrap(),
        "--genotypes",
        genotypes.to_str().unwrap(),
        "--num-samples",
        "4",
        "--out",
        out.to_str().unwrap(),
    ])
    .expect("build-ancestors run should succeed");

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    // One descriptor per focal site: frequency 4 sites (1,2,3) then frequency 3 (0).
    assert_eq!(lines.len(), 4);

    let focal_0_line = lines.last().unwrap();
    let mut fields = focal_0_line.split_whitespace();
    let start: u32 = fields.next().unwrap().parse().unwrap();
    let end: u32 = fields.next().unwrap().parse().unwrap();
    let alleles: Vec<i8> = fields.map(|f| f.parse().unwrap()).collect();
    assert_eq!((start, end), (0, 4));
    assert_eq!(alleles, vec![1, 1, 1, 0]);
}
