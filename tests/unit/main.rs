//! Unit tests mirroring the `src` tree, one file per source module


#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use rodgrid::io::cli::Cli;

    // Tests the binary's argument definition has no conflicting flags
    // Verified by giving two arguments the same short flag
    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
