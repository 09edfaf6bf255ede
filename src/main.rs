use logwork::cli::{classify, run, ErrorClass};

fn main() {
    if let Err(e) = run() {
        let class = classify(&e);
        match class {
            // The operation didn't apply; say so and exit cleanly
            ErrorClass::Informational => eprintln!("{}", e),
            ErrorClass::User => eprintln!("Error: {}", e),
            ErrorClass::Internal => {
                eprintln!("Internal error: {}", e);
                // Show error chain if available
                let mut source = e.source();
                if source.is_some() {
                    eprintln!("\nCaused by:");
                    let mut indent = 1;
                    while let Some(err) = source {
                        eprintln!("{:indent$}  {}", "", err);
                        source = err.source();
                        indent += 1;
                    }
                }
            }
        }
        std::process::exit(class.exit_code());
    }
}
