/// Service and unit naming constants
pub mod service {
    /// Default systemd unit name for the PyViewer server
    pub const DEFAULT_NAME: &str = "pyviewer";

    /// Suffix appended to the unit name on disk
    pub const UNIT_SUFFIX: &str = ".service";

    /// Name of the generated wrapper launcher script
    pub const WRAPPER_NAME: &str = "pyviewer-server";
}

/// Installation payload constants
pub mod payload {
    /// Entry point of the PyViewer server inside the install directory
    pub const SERVER_ENTRY: &str = "pyviewer.server.py";

    /// Files copied from the source directory into the install directory
    pub const FILES: &[&str] = &["pyviewer.server.py", "server.ini"];

    /// Of the payload files, only the entry point is mandatory
    pub const REQUIRED: &[&str] = &["pyviewer.server.py"];
}

/// Python environment constants
pub mod python {
    /// Interpreter used to create the virtual environment
    pub const DEFAULT_INTERPRETER: &str = "python3";

    /// Directory name of the virtual environment inside the install directory
    pub const VENV_DIR: &str = "venv";

    /// Python packages the PyViewer server imports
    pub const PACKAGES: &[&str] = &["PyQt6", "Pillow", "mss", "pynput"];
}

/// External binaries the server shells out to at runtime
pub mod binaries {
    /// Without these the installer refuses to proceed
    pub const REQUIRED: &[&str] = &["python3", "systemctl"];

    /// Missing these degrades major features (FFmpeg streaming, audio)
    pub const RECOMMENDED: &[&str] = &["ffmpeg", "parec", "pactl"];

    /// Missing these degrades minor features (GPU detection)
    pub const OPTIONAL: &[&str] = &["lspci"];

    /// Any one of these enables legacy screen capture on Wayland
    pub const WAYLAND_CAPTURE: &[&str] = &["flameshot", "gnome-screenshot", "wayshot", "grim"];
}
