//! Library-level runs of the annotation pipeline against a fake snpEff.

#![cfg(unix)]

mod common;

use std::fs;

use snpeff_wrapper::{
    annotate_vcf, AnnotationRequest, CodonTableMap, KnownIssue, OutputDestination,
    PipelineError, SnpEff, SnpEffError, ValidationError,
};

use common::{record_count, FakeSnpEff, Workspace, VCF};

fn request(ws: &Workspace, tables: &str) -> AnnotationRequest {
    let mut request = AnnotationRequest::new(
        &ws.vcf,
        &ws.annotation,
        CodonTableMap::parse(tables).unwrap(),
        OutputDestination::File(ws.path().join("annotated.vcf")),
    );
    request.scratch_parent = ws.path().to_path_buf();
    request
}

#[test]
fn test_successful_run() {
    let ws = Workspace::new("ref.gff", &FakeSnpEff::default());
    let snpeff = SnpEff::new(&ws.java, &ws.jar);

    let summary = annotate_vcf(&snpeff, &request(&ws, "{default: Standard}")).unwrap();

    assert!(summary.validation.warnings().is_empty());
    assert!(summary.issues.is_empty());
    assert_eq!(summary.summary_csv, Some(ws.path().join("annotated.vcf.csv")));
    assert_eq!(summary.retained_scratch, None);

    let annotated = fs::read_to_string(ws.path().join("annotated.vcf")).unwrap();
    assert_eq!(record_count(&annotated), record_count(VCF));
    assert!(ws.scratch_dirs().is_empty());
}

#[test]
fn test_partial_overlap_is_tolerated() {
    let ws = Workspace::new("ref.gff", &FakeSnpEff::default());
    fs::write(&ws.annotation, "chr2\ttest\tgene\t1\t900\t.\t+\t.\tID=g\nchr3\ttest\tgene\t1\t9\t.\t+\t.\tID=h\n")
        .unwrap();
    let snpeff = SnpEff::new(&ws.java, &ws.jar);

    let summary = annotate_vcf(&snpeff, &request(&ws, "{default: Standard}")).unwrap();
    assert_eq!(summary.validation.missing_annotations, vec!["chr1"]);
    assert_eq!(summary.validation.warnings().len(), 1);
}

#[test]
fn test_retained_scratch_contains_database() {
    let ws = Workspace::new("ref.gff", &FakeSnpEff::default());
    let snpeff = SnpEff::new(&ws.java, &ws.jar);
    let mut request = request(&ws, "{chr1: Standard, chr2: Bacterial_and_Plant_Plastid}");
    request.keep = true;

    let summary = annotate_vcf(&snpeff, &request).unwrap();
    let scratch = summary.retained_scratch.expect("scratch should be kept");
    assert!(scratch.join("data/genes.gff").is_file());

    let config = fs::read_to_string(scratch.join("config")).unwrap();
    assert!(config.contains("data.chromosomes : chr1, chr2"));
    assert!(config.contains("data.chr1.codonTable : Standard"));
    assert!(config.contains("data.chr2.codonTable : Bacterial_and_Plant_Plastid"));
    assert!(config.contains(&format!("data.dir = {}", scratch.display())));
}

#[test]
fn test_issues_are_tallied() {
    let fake = FakeSnpEff {
        annotation: "A|x|||||||||||||WARNING_REF_DOES_NOT_MATCH_GENOME".to_string(),
        ..FakeSnpEff::default()
    };
    let ws = Workspace::new("ref.gff", &fake);
    let snpeff = SnpEff::new(&ws.java, &ws.jar);

    let summary = annotate_vcf(&snpeff, &request(&ws, "{default: Standard}")).unwrap();
    assert_eq!(summary.issues.count(KnownIssue::RefDoesNotMatchGenome), 3);
    assert_eq!(summary.issues.count(KnownIssue::ChromosomeNotFound), 0);
}

#[test]
fn test_build_failure_cleans_up() {
    let fake = FakeSnpEff {
        build_exit: 1,
        ..FakeSnpEff::default()
    };
    let ws = Workspace::new("ref.gff", &fake);
    let snpeff = SnpEff::new(&ws.java, &ws.jar);

    let err = annotate_vcf(&snpeff, &request(&ws, "{default: Standard}")).unwrap_err();
    assert!(matches!(err, PipelineError::SnpEff(SnpEffError::BuildDatabase)));
    assert!(ws.scratch_dirs().is_empty());
    assert!(!ws.path().join("annotated.vcf").exists());
}

#[test]
fn test_annotate_failure() {
    let fake = FakeSnpEff {
        annotate_exit: 1,
        ..FakeSnpEff::default()
    };
    let ws = Workspace::new("ref.gff", &fake);
    let snpeff = SnpEff::new(&ws.java, &ws.jar);

    let err = annotate_vcf(&snpeff, &request(&ws, "{default: Standard}")).unwrap_err();
    assert!(matches!(err, PipelineError::SnpEff(SnpEffError::Annotation(_))));
    assert!(ws.scratch_dirs().is_empty());
}

#[test]
fn test_validation_precedes_snpeff() {
    let ws = Workspace::new("ref.gff", &FakeSnpEff::default());
    // Not executable: any attempt to run snpEff would fail differently
    let snpeff = SnpEff::new(ws.path().join("no-java"), &ws.jar);

    let err = annotate_vcf(&snpeff, &request(&ws, "{default: Bogus}")).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Validation(ValidationError::UnknownCodingTable)
    ));
    assert!(ws.scratch_dirs().is_empty());
}

#[test]
fn test_summary_delivery_failure_withholds_vcf() {
    let ws = Workspace::new("ref.gff", &FakeSnpEff::default());
    let snpeff = SnpEff::new(&ws.java, &ws.jar);
    let mut request = request(&ws, "{default: Standard}");
    request.summary_csv = Some(ws.path().join("no_such_dir/stats.csv"));

    let err = annotate_vcf(&snpeff, &request).unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
    assert!(!ws.path().join("annotated.vcf").exists());
    assert!(ws.scratch_dirs().is_empty());
}

#[test]
fn test_vcf_delivery_failure_removes_summary() {
    let ws = Workspace::new("ref.gff", &FakeSnpEff::default());
    let snpeff = SnpEff::new(&ws.java, &ws.jar);
    let mut request = request(&ws, "{default: Standard}");
    request.output_vcf = OutputDestination::File(ws.path().join("no_such_dir/annotated.vcf"));
    request.summary_csv = Some(ws.path().join("stats.csv"));

    let err = annotate_vcf(&snpeff, &request).unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
    assert!(!ws.path().join("stats.csv").exists());
    assert!(!ws.path().join("no_such_dir/annotated.vcf").exists());
    assert!(ws.scratch_dirs().is_empty());
}
