use std::path::Path;

fn main() {
    let src_dir = Path::new("src");
    let parser_path = src_dir.join("parser.c");
    println!("cargo:rerun-if-changed={}", parser_path.display());

    if !parser_path.exists() {
        panic!(
            "{} is missing; run `tree-sitter generate` to produce the Lab1 parser",
            parser_path.display()
        );
    }

    let mut c_config = cc::Build::new();
    c_config.std("c11").include(src_dir);

    #[cfg(target_env = "msvc")]
    c_config.flag("-utf-8");

    c_config.file(&parser_path);

    let scanner_path = src_dir.join("scanner.c");
    if scanner_path.exists() {
        println!("cargo:rerun-if-changed={}", scanner_path.display());
        c_config.file(&scanner_path);
    }

    c_config.compile("tree-sitter-lab1");
}
