fn main() {
    konversation_scripting::script_main()
}
