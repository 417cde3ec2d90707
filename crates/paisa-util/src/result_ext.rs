use std::fmt::Display;

pub trait ResultExt<T, InitialError> {
    /// Map an error to a string-based error variant
    ///
    /// Turns `Result<T, InitialError>` into `Result<T, FinalError>` when `FinalError` has a
    /// variant holding a `String`, using the `Display` output of `InitialError`.
    ///
    /// # Example
    /// ```rust
    /// use paisa_util::result_ext::ResultExt;
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// enum StoreError {
    ///     #[error("unable to read entry: {0}")]
    ///     Read(String),
    /// }
    ///
    /// fn read_entry() -> Result<String, StoreError> {
    ///     let entry = std::fs::read_to_string("missing-entry.json").map_err_str(StoreError::Read)?;
    ///     Ok(entry)
    /// }
    /// ```
    fn map_err_str<FinalError, F>(self, f: F) -> Result<T, FinalError>
    where
        InitialError: Display,
        F: FnOnce(String) -> FinalError;
}

impl<Type, InitialError> ResultExt<Type, InitialError> for Result<Type, InitialError> {
    fn map_err_str<FinalError, F>(self, f: F) -> Result<Type, FinalError>
    where
        InitialError: Display,
        F: FnOnce(String) -> FinalError,
    {
        self.map_err(|e| f(e.to_string()))
    }
}
