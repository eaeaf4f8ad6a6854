pub fn print_banner(version: &str) {
    let banner = format!(
        r#"
 ██╗███████╗███████╗ ██████╗
 ██║██╔════╝██╔════╝██╔════╝
 ██║█████╗  ███████╗██║         ifsc-api
 ██║██╔══╝  ╚════██║██║         v{}
 ██║██║     ███████║╚██████╗
 ╚═╝╚═╝     ╚══════╝ ╚═════╝
"#,
        version
    );

    tracing::info!("{}", banner);
}
