//! Derived-field regeneration shared by every structural action.

use rand::Rng;

use nnviz_model::{Connection, Layer, Position};

/// x coordinate of layer `index` in a row of `count` layers, centered on 0.
pub fn layer_x(index: usize, count: usize, spacing: f32) -> f32 {
    let span = count.saturating_sub(1) as f32 * spacing;
    -span / 2.0 + index as f32 * spacing
}

/// Recomputes every position and rebuilds the connection list.
///
/// Always runs over the whole list; a single append shifts every sibling.
pub fn regenerate<R: Rng + ?Sized>(
    layers: &mut [Layer],
    spacing: f32,
    rng: &mut R,
) -> Vec<Connection> {
    let count = layers.len();
    for (index, layer) in layers.iter_mut().enumerate() {
        layer.position = Position::new(layer_x(index, count, spacing), 0.0, 0.0);
    }
    layers
        .windows(2)
        .map(|pair| Connection::new(&pair[0], &pair[1], rng.random_range(-1.0..=1.0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nnviz_model::{LayerKind, LayerParams};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layers(n: usize) -> Vec<Layer> {
        (0..n)
            .map(|_| Layer::new("Dense", LayerParams::default_for(LayerKind::Dense)))
            .collect()
    }

    #[test]
    fn single_layer_sits_at_origin() {
        assert_eq!(layer_x(0, 1, 3.0), 0.0);
    }

    #[test]
    fn odd_row_is_symmetric() {
        let xs: Vec<f32> = (0..3).map(|i| layer_x(i, 3, 3.0)).collect();
        assert_eq!(xs, vec![-3.0, 0.0, 3.0]);
    }

    #[test]
    fn connections_link_neighbours() {
        let mut row = layers(4);
        let conns = regenerate(&mut row, 2.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(conns.len(), 3);
        for (i, conn) in conns.iter().enumerate() {
            assert_eq!(conn.from_layer_id, row[i].id);
            assert_eq!(conn.to_layer_id, row[i + 1].id);
            assert!((-1.0..=1.0).contains(&conn.weight));
        }
    }

    #[test]
    fn empty_row_has_no_connections() {
        let mut row = layers(0);
        assert!(regenerate(&mut row, 3.0, &mut StdRng::seed_from_u64(3)).is_empty());
    }
}
