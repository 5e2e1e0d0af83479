use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub children: Html,
}

/// Blocking prompt attached to `document.body` instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(
        html! {
            <dialog class="prompt" open={true}>
                <article>
                    <h2>{props.title.clone()}</h2>
                    <footer>{props.children.clone()}</footer>
                </article>
            </dialog>
        },
        modal_host.into(),
    )
}

/// Inline CSS for a cell or swatch at the given opacity.
pub(crate) fn opacity_style(opacity: nochmal_core::Opacity) -> String {
    format!("opacity: {}", opacity.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nochmal_core::Opacity;

    #[test]
    fn opacity_style_formats_css() {
        assert_eq!(opacity_style(Opacity::Full), "opacity: 1");
        assert_eq!(opacity_style(Opacity::Half), "opacity: 0.5");
        assert_eq!(opacity_style(Opacity::Dim), "opacity: 0.2");
    }
}
