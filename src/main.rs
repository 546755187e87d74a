fn main() {
    use asc_tree::cli::parse;
    let cli = parse();
    let code = asc_tree::app::run_cli(cli);
    if code != 0 {
        std::process::exit(code);
    }
}
