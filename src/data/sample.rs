use super::model::{Record, Table};

const IMAGE_BASE: &str = "https://raw.githubusercontent.com/streamlit/example-data/main/images";

#[allow(clippy::too_many_arguments)]
fn pin(
    name: &str,
    serie: &str,
    collection: &str,
    quantity: u32,
    state: &str,
    tradeable: bool,
    price: f64,
    tags: &str,
    notes: &str,
    image: &str,
) -> Record {
    Record {
        name: name.into(),
        serie: serie.into(),
        collection: collection.into(),
        quantity,
        state: state.into(),
        tradeable,
        price,
        tags: tags.into(),
        notes: notes.into(),
        image_url: format!("{IMAGE_BASE}/{image}"),
        ..Record::blank(0)
    }
}

/// Small built-in collection shown when nothing has been loaded yet.
pub fn make_sample() -> Table {
    Table::new(
        Vec::new(),
        vec![
            pin(
                "Pikachu #001", "Kanto", "Starter", 1, "Neuf", false, 9.9,
                "jaune, électrique", "Edition 2024", "pikachu.png",
            ),
            pin(
                "Bulbasaur #002", "Kanto", "Starter", 2, "Bon", true, 7.5,
                "plante", "", "bulbasaur.png",
            ),
            pin(
                "Eevee #133", "Kanto", "Cute", 1, "Très bon", true, 12.0,
                "évoli", "Cadeau", "eevee.png",
            ),
        ],
    )
}
