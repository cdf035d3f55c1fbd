use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn missing_path_run_still_exits_success_and_emits_verbatim_contigs() {
    let dir = TempDir::new().unwrap();
    let contigs = write(dir.path(), "contigs.fa", ">ctg1\nACGTACGTACGT\n>ctg2\nTTTTGGGGCCCC\n");
    let reads = write(dir.path(), "reads.fa", ">r1\nACGT\n");
    let contig_read_paf = write(dir.path(), "cr.paf", "");
    let read_read_paf = write(dir.path(), "rr.paf", "");
    let output = dir.path().join("out.fasta");

    Command::cargo_bin("scaffold")
        .unwrap()
        .args([&contigs, &reads, &contig_read_paf, &read_read_paf])
        .args(["-o"])
        .arg(&output)
        .assert()
        .success();

    let contents = fs::read_to_string(&output).unwrap();
    assert!(contents.contains(">ctg1"));
    assert!(contents.contains(">ctg2"));
    assert!(contents.contains("ACGTACGTACGT"));
}

#[test]
fn missing_contigs_file_is_a_non_zero_exit() {
    let dir = TempDir::new().unwrap();
    let reads = write(dir.path(), "reads.fa", ">r1\nACGT\n");
    let contig_read_paf = write(dir.path(), "cr.paf", "");
    let read_read_paf = write(dir.path(), "rr.paf", "");

    Command::cargo_bin("scaffold")
        .unwrap()
        .args([dir.path().join("does_not_exist.fa"), reads, contig_read_paf, read_read_paf])
        .assert()
        .failure();
}

#[test]
fn malformed_paf_record_is_a_non_zero_exit() {
    let dir = TempDir::new().unwrap();
    let contigs = write(dir.path(), "contigs.fa", ">ctg1\nACGT\n");
    let reads = write(dir.path(), "reads.fa", ">r1\nACGT\n");
    // abl = 0 is rejected as a format error
    let contig_read_paf = write(dir.path(), "cr.paf", "r1\t4\t0\t4\t+\tctg1\t4\t0\t4\t4\t0\t60\n");
    let read_read_paf = write(dir.path(), "rr.paf", "");

    Command::cargo_bin("scaffold")
        .unwrap()
        .args([contigs, reads, contig_read_paf, read_read_paf])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scaffolding pipeline failed"));
}
