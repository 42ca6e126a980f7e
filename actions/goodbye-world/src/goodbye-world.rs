fn main() -> std::process::ExitCode {
    action_core::main(&goodbye_world::action())
}
