use console::Style;
use seamweld_core::pipeline::config::StitchConfig;
use seamweld_core::pipeline::StitchReport;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_stitch_summary(config: &StitchConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Seamweld"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(8)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Image 1"),
        s.path.apply_to(config.source1.display())
    );
    if config.mode.needs_second_image() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Image 2"),
            s.path.apply_to(config.source2.display())
        );
        println!(
            "  {:<14}{}",
            s.label.apply_to("Margin"),
            s.value.apply_to(format!("{} px", config.margin))
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mode"),
        s.method.apply_to(config.mode)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    match config.seam_mask {
        Some(ref mask) => println!(
            "  {:<14}{}",
            s.label.apply_to("Seam mask"),
            s.path.apply_to(mask.display())
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Seam mask"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!();
}

pub fn print_report(report: &StitchReport, config: &StitchConfig) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Result"),
        s.value
            .apply_to(format!("{}x{}", report.width, report.height))
    );
    if let Some(cost) = report.cut_cost {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Cut cost"),
            s.value.apply_to(format!("{cost:.4}"))
        );
    }
    if let Some(ref cols) = report.seam_columns {
        if let (Some(min), Some(max)) = (cols.iter().min(), cols.iter().max()) {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Seam columns"),
                s.value.apply_to(format!("{min}..={max} of {}", config.margin))
            );
        }
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Saved to"),
        s.path.apply_to(config.output.display())
    );
    println!();
}
