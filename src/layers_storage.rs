use std::fmt;

use crate::activation::Activation;
use crate::err::{NetError, NetResult};
use crate::layers::Layer;

/// Ordered layers of a network, input first.
#[derive(Clone, Debug)]
pub struct LayersStorage {
    layers: Vec<Layer>,
}

impl LayersStorage {
    /// Setup the layers with [0] - input size, [...] - hidden neurons, [N] - output size.
    ///
    /// The input layer passes values through unchanged (identity), every
    /// following layer is sigmoid.
    pub fn new_simple_network(sizes: &[usize]) -> NetResult<Self> {
        if sizes.len() < 2 {
            return Err(NetError::InvalidTopology(format!(
                "at least 2 layers are required, got {}",
                sizes.len()
            )));
        }

        if let Some(idx) = sizes.iter().position(|s| *s == 0) {
            return Err(NetError::InvalidTopology(format!("layer {} has zero size", idx)));
        }

        let layers = sizes
            .iter()
            .enumerate()
            .map(|(idx, size)| Layer::new(Self::activation_for(idx), *size))
            .collect();

        Ok(Self { layers })
    }

    fn activation_for(idx: usize) -> Activation {
        if idx == 0 {
            Activation::Identity
        } else {
            Activation::Sigmoid
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn at(&self, id: usize) -> &Layer {
        &self.layers[id]
    }

    pub fn get(&self, id: usize) -> Option<&Layer> {
        self.layers.get(id)
    }

    pub fn first(&self) -> &Layer {
        &self.layers[0]
    }

    pub fn first_mut(&mut self) -> &mut Layer {
        &mut self.layers[0]
    }

    pub fn last(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    pub fn last_mut(&mut self) -> &mut Layer {
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    /// Layers `id` and `id + 1`, both mutable
    pub fn pair_mut(&mut self, id: usize) -> (&mut Layer, &mut Layer) {
        let (head, tail) = self.layers.split_at_mut(id + 1);
        (&mut head[id], &mut tail[0])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::len).collect()
    }
}

impl fmt::Display for LayersStorage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sizes: Vec<String> = self.layers.iter().map(|l| l.len().to_string()).collect();

        write!(f, "{}", sizes.join("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_policy() {
        let ls = LayersStorage::new_simple_network(&[3, 5, 2]).unwrap();

        assert_eq!(ls.len(), 3);
        assert_eq!(ls.sizes(), vec![3, 5, 2]);
        assert_eq!(ls.first().activation(), Activation::Identity);
        assert_eq!(ls.at(1).activation(), Activation::Sigmoid);
        assert_eq!(ls.last().activation(), Activation::Sigmoid);
        assert_eq!(ls.to_string(), "3-5-2");

        let lens: Vec<usize> = ls.iter().map(Layer::len).collect();
        assert_eq!(lens, ls.sizes());
    }

    #[test]
    fn test_invalid_topology() {
        assert!(matches!(
            LayersStorage::new_simple_network(&[4]),
            Err(NetError::InvalidTopology(_))
        ));
        assert!(LayersStorage::new_simple_network(&[]).is_err());
        assert!(LayersStorage::new_simple_network(&[2, 0, 1]).is_err());
    }

    #[test]
    fn test_pair_mut() {
        let mut ls = LayersStorage::new_simple_network(&[1, 2, 3]).unwrap();
        let (alpha, beta) = ls.pair_mut(1);

        assert_eq!(alpha.len(), 2);
        assert_eq!(beta.len(), 3);
    }
}
