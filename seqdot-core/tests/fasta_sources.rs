use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use seqdot_core::{build_matrix, FastaError, FastaParser, Session};
use tempfile::NamedTempFile;

fn write_fasta(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp fasta");
    write!(f, "{}", contents).unwrap();
    f
}

#[test]
fn last_record_is_used_for_comparison() {
    let fasta = write_fasta(">first\nAAAA\n>second some description\nACGT\nTT\n");

    let all = FastaParser::parse_file(fasta.path()).expect("parse fasta");
    assert_eq!(all.len(), 2);

    let seq = FastaParser::read_sequence(fasta.path()).expect("read sequence");
    assert_eq!(seq.id, "second");
    assert_eq!(seq.symbols(), b"ACGTTT");
}

#[test]
fn gzipped_fasta_is_decompressed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seq.fa.gz");
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(b">gz\nGATTACA\n").unwrap();
    encoder.finish().unwrap();

    let seq = FastaParser::read_sequence(&path).expect("read gz fasta");
    assert_eq!(seq.id, "gz");
    assert_eq!(seq.symbols(), b"GATTACA");
}

#[test]
fn invalid_record_is_reported() {
    let fasta = write_fasta(">bad\nACGXT\n");
    let err = FastaParser::read_sequence(fasta.path()).unwrap_err();
    let fasta_err = err
        .downcast_ref::<FastaError>()
        .expect("fasta error in chain");
    assert!(matches!(fasta_err, FastaError::Sequence { .. }));
}

#[test]
fn missing_file_fails() {
    assert!(FastaParser::read_sequence("/nonexistent/seqdot/input.fa").is_err());
}

#[test]
fn files_feed_a_session() {
    let a = write_fasta(">a\nACGTACGT\n");
    let b = write_fasta(">b\nCGTA\n");
    let seq1 = FastaParser::read_sequence(a.path()).unwrap();
    let seq2 = FastaParser::read_sequence(b.path()).unwrap();

    let expected = build_matrix(seq1.symbols(), seq2.symbols()).unwrap();
    let session = Session::new(seq1, "a.fa", seq2, "b.fa");
    assert_eq!(session.matrix().unwrap(), &expected);
    assert_eq!(expected.dimensions(), (4, 8));
}

#[test]
fn file_and_reader_paths_agree() {
    let contents = ">x first\nACgt\nTA\n>y\nGGCC\n";
    let fasta = write_fasta(contents);

    let from_file = FastaParser::parse_file(fasta.path()).unwrap();
    let from_reader = FastaParser::parse_reader(std::io::Cursor::new(contents)).unwrap();
    assert_eq!(from_file, from_reader);
    assert_eq!(from_file[0].symbols(), b"ACGTTA");
    assert_eq!(from_file[0].description.as_deref(), Some("first"));
}

#[test]
fn invalid_record_fails_the_same_way_from_file_and_reader() {
    let contents = ">ok\nACGT\n>amb\nACNT\n";
    let fasta = write_fasta(contents);

    let file_err = FastaParser::parse_file(fasta.path()).unwrap_err();
    assert!(matches!(
        file_err.downcast_ref::<FastaError>(),
        Some(FastaError::Sequence { id, .. }) if id == "amb"
    ));
    assert!(matches!(
        FastaParser::parse_reader(std::io::Cursor::new(contents)),
        Err(FastaError::Sequence { id, .. }) if id == "amb"
    ));
}
