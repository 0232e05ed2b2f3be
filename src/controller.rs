use tera::{Context, Tera};

/// Contract for controllers that render templates.
///
/// Implementors only expose their engine; `render` is provided.
pub trait TemplateController {
    /// The engine the helpers were registered into.
    fn engine(&self) -> &Tera;

    /// Renders the named template with the given context.
    fn render(&self, name: &str, context: &Context) -> tera::Result<String> {
        self.engine().render(name, context)
    }
}
