//! Project identity.

/// Identity of the application being packaged.
///
/// # Examples
///
/// ```no_run
/// use qtpack::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "Procyon".into(),
///     version: "1.2.3".into(),
///     executable: None,
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Product name.
    ///
    /// Used in the final package name, as the AppImage desktop-entry and icon
    /// base name, and as the dmg volume name.
    pub product_name: String,

    /// Version string, read from the version text file at release time.
    ///
    /// Example: "1.2.3"
    pub version: String,

    /// Name of the built executable (or application bundle on macOS).
    ///
    /// Default: None (derived from the product name: `<name>.exe` on Windows,
    /// `<name>.app` on macOS, `<name>` elsewhere)
    pub executable: Option<String>,
}
