use std::path::{Component, Path};

/// URI `file://` de una pista para que la interfaz pueda cargarla.
///
/// La raíz se deja tal cual; cada segmento se codifica por separado.
pub fn track_uri(path: &Path) -> String {
    let mut root = String::new();
    let mut segments = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => root.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => root.push('/'),
            Component::CurDir => {}
            Component::ParentDir => segments.push("..".to_string()),
            Component::Normal(name) => segments.push(urlencoding::encode(&name.to_string_lossy()).into_owned()),
        }
    }

    // en Windows el prefijo va delante de su propia barra: file:///C:/...
    if !root.is_empty() && !root.starts_with('/') {
        root.insert(0, '/');
    }

    format!("file://{root}{}", segments.join("/"))
}
