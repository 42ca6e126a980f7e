fn main() -> std::process::ExitCode {
    action_core::main(&hello_world::action())
}
