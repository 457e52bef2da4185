use crate::web::http::ApiError;

pub enum Msg<M> {
    Load,
    Loaded(Result<Vec<M>, ApiError>),
    SetField(&'static str, String),
    /// Flips one menu code in an access-list field.
    ToggleAccess(&'static str, u32),
    Edit(M),
    Cancel,
    Submit,
    Submitted(Result<String, ApiError>),
    Search(String),
    Page(usize),
}
