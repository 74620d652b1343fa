use crate::domain::SemanticVersion;
use crate::engine::VersionCalculation;
use crate::git::VersionTag;
use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_calculation(start_tag: Option<&VersionTag>, calculation: &VersionCalculation) {
    let next = style(calculation.version.to_string()).green().bold();
    match start_tag {
        Some(tag) => println!("{} {} {}", style(&tag.name).dim(), style("→").cyan(), next),
        None => println!(
            "{} {} {}",
            style("(no release tag)").dim(),
            style("→").cyan(),
            next
        ),
    }
    if calculation.is_version_downstream_flowed {
        println!(
            "  {}",
            style("a breaking signal flowed downstream (zero-major)").yellow()
        );
    }
}

pub fn display_cached(version: &SemanticVersion) {
    println!(
        "{} {}",
        style(version.to_string()).green().bold(),
        style("(cached)").dim()
    );
}
