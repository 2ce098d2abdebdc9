#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    let mut res = WindowsResource::new();
    if std::path::Path::new("res/scireport.ico").exists() {
        res.set_icon("res/scireport.ico");
    }
    res.set("FileDescription", "scireport CLI")
        .set("ProductName", "scireport")
        .set("OriginalFilename", "scireport.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed version resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
