//! Library integration tests.

use envgate::EnvgateError;

#[test]
fn error_types_are_public() {
    let err = EnvgateError::UnknownMode {
        value: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> envgate::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use envgate::cli::{Cli, Commands};

    let cli = Cli::parse_from(["envgate", "context", "--json"]);
    if let Commands::Context(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Context command");
    }
}
