/// Source of unique string identifiers for payments and favorites.
///
/// Any scheme works as long as the identifiers it hands out never repeat and
/// contain neither spaces nor `;` (they end up in dump files verbatim).
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

pub type IdGeneratorBox = Box<dyn IdGenerator>;
