//! foam-agent-mcp CLI binary
//!
//! All logic lives in the library; main only maps the outcome to an exit code.

fn main() {
    std::process::exit(foam_agent_mcp::cli::run());
}
