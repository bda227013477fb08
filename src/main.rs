fn main() -> std::io::Result<()> {
    dualboard::uci::uci_top::run_stdio_loop()
}
