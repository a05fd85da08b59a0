use colored::*;
use eyre::Result;

use guildtone::help::{HelpPage, HelpSystem};

use crate::cli::OutputFormat;

pub fn run(topic: &[String], format: OutputFormat, verbose: bool, help: &HelpSystem) -> Result<()> {
    let (page, source) = help.render(topic);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&page)?),
        OutputFormat::Text => {
            print_page(&page);
            if verbose {
                println!();
                println!("{}", format!("(served by {})", source).dimmed());
            }
        }
    }

    Ok(())
}

/// Print a page the way an embed lays it out: title, description, one block
/// per section, footer
fn print_page(page: &HelpPage) {
    println!("{}", page.title.bold());
    if !page.description.is_empty() {
        println!("{}", page.description);
    }

    for section in &page.sections {
        println!();
        println!("{}", section.name.cyan().bold());
        for line in &section.lines {
            match line.split_once(": ") {
                Some((usage, about)) => println!("  {}  {}", usage.green(), about.dimmed()),
                None => println!("  {}", line.green()),
            }
        }
    }

    if let Some(footer) = &page.footer {
        println!();
        println!("{}", footer.dimmed());
    }
}
