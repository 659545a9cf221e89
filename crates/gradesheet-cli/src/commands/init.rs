//! The `gradesheet init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create gradesheet.toml
    if std::path::Path::new("gradesheet.toml").exists() {
        println!("gradesheet.toml already exists, skipping.");
    } else {
        std::fs::write("gradesheet.toml", SAMPLE_CONFIG)?;
        println!("Created gradesheet.toml");
    }

    // Create example rubric template
    std::fs::create_dir_all("templates")?;
    let example_path = std::path::Path::new("templates/example.txt");
    if example_path.exists() {
        println!("templates/example.txt already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_TEMPLATE)?;
        println!("Created templates/example.txt");
    }

    println!("\nNext steps:");
    println!("  1. Edit templates/example.txt to match your rubric");
    println!("  2. Run: gradesheet validate --sheet templates/example.txt");
    println!("  3. Run: gradesheet show --sheet templates/example.txt");
    println!("  4. Run: gradesheet grade --part \"Part 1\" --dir <submission> --check 0:0:0");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradesheet configuration

[[parts]]
name = "Part 1"
template = "templates/example.txt"
grade_file = "grade.txt"
submissions = "*.rs"
"#;

const EXAMPLE_TEMPLATE: &str = "\
S Part 1 feedback
CAT [10] Style
\tDED [O] [-1, -2, -4] Formatting
\t\tCRT [O] Inconsistent indentation
\t\tCRT [O] Unclear names
\t\tCRT [O] Dead code left in
\tDED [O] [-1] Missing module documentation
CAT [20] Correctness
\tDED [O] [-5, -10, -20] Failing cases
\t\tCRT [O] Empty input
\t\tCRT [O] Very large input
\t\tCRT [O] Invalid input
\tDED [O] [-2.5] Off-by-one in output
S Score: %t / %m
CAT [0] No submission
\tDED [O] [-30] No submission
";
