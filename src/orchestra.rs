use std::time::Instant;

use log::{debug, info};

use crate::dataloader::DataLoader;
use crate::err::{NetError, NetResult};
use crate::error_function::ErrorFunction;
use crate::network::Network;
use crate::util::Float;

pub enum CallbackReturnAction {
    None,
    Stop,
}

/// Neural-Network learning orchestrator.
///
/// Runs `set_input; fire; learn` once per iteration with a fixed learning
/// rate, pulling one sample per iteration from the train dataset. The loop
/// length is decided by the caller, registered callbacks may stop it early.
pub struct Orchestra<E>
where
    E: ErrorFunction,
{
    net: Network<E>,
    train_dl: Option<Box<dyn DataLoader>>,
    learn_rate: Float,
    log_iter: usize,
    // callback fn args : (iteration_number, error of this iteration)
    callbacks: Vec<Box<dyn FnMut(usize, Float) -> CallbackReturnAction>>,
}

impl<E> Orchestra<E>
where
    E: ErrorFunction,
{
    pub fn new(net: Network<E>) -> Self {
        Orchestra {
            net,
            train_dl: None,
            learn_rate: 0.1,
            log_iter: 0,
            callbacks: Vec::new(),
        }
    }

    pub fn learn_rate(mut self, learn_rate: Float) -> Self {
        self.learn_rate = learn_rate;
        self
    }

    pub fn set_learn_rate(&mut self, learn_rate: Float) {
        self.learn_rate = learn_rate;
    }

    /// Logs the current error each `log_iter` iterations, 0 disables it
    pub fn log_iter(mut self, log_iter: usize) -> Self {
        self.log_iter = log_iter;
        self
    }

    pub fn train_dataloader(mut self, train_dl: Box<dyn DataLoader>) -> Self {
        self.train_dl = Some(train_dl);
        self
    }

    pub fn set_train_dataset(&mut self, data: Box<dyn DataLoader>) {
        self.train_dl = Some(data)
    }

    pub fn add_callback(&mut self, c: Box<dyn FnMut(usize, Float) -> CallbackReturnAction>) {
        self.callbacks.push(c);
    }

    pub fn network(&self) -> &Network<E> {
        &self.net
    }

    pub fn network_mut(&mut self) -> &mut Network<E> {
        &mut self.net
    }

    pub fn into_network(self) -> Network<E> {
        self.net
    }

    fn perform_step(&mut self) -> NetResult<Float> {
        let train_dl = self
            .train_dl
            .as_ref()
            .ok_or_else(|| NetError::InvalidCfg("train dataset isn't set".to_owned()))?;

        let entry = train_dl.next();

        self.net
            .train_step(&entry.input, &entry.expected, self.learn_rate)
    }

    /// Trains for exactly `times` iterations unless a callback stops it.
    /// Returns the error of every performed iteration.
    pub fn train_for_n_times(&mut self, times: usize) -> NetResult<Vec<Float>> {
        if !self.learn_rate.is_finite() || self.learn_rate <= 0.0 {
            return Err(NetError::InvalidCfg(format!(
                "learning rate must be positive, got {}",
                self.learn_rate
            )));
        }

        info!(
            "Start train for {} iterations with learning rate {}",
            times, self.learn_rate
        );

        let now_time = Instant::now();
        let mut errors = Vec::with_capacity(times);

        for iter_num in 0..times {
            let err = self.perform_step()?;
            errors.push(err);

            debug!("Iteration {} , error : {}", iter_num, err);

            if self.log_iter != 0 && iter_num % self.log_iter == 0 {
                info!("On iter {} , error is : {:.6}", iter_num, err);
            }

            let mut flag_stop = false;

            for it_cb in self.callbacks.iter_mut() {
                if let CallbackReturnAction::Stop = it_cb(iter_num, err) {
                    flag_stop = true;
                }
            }

            if flag_stop {
                info!("Stopping training loop on {} iteration...", iter_num);
                break;
            }
        }

        info!("Training finished !");
        info!("Iterations : {}", errors.len());

        if let Some(last) = errors.last() {
            info!("Last error : {}", last);
        }

        info!("Elapsed for training : {} ms", now_time.elapsed().as_millis());

        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataloader::{LabeledEntry, SimpleDataLoader};
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use ndarray_rand::rand::rngs::StdRng;
    use ndarray_rand::rand::SeedableRng;
    use std::cell::Cell;
    use std::rc::Rc;

    fn orchestra() -> Orchestra<crate::error_function::SquaredError> {
        let net = Network::new(&mut StdRng::seed_from_u64(3), &[2, 1]).unwrap();
        let dl = SimpleDataLoader::new(vec![LabeledEntry::new(vec![1.0, 0.5], vec![0.8])]).unwrap();

        Orchestra::new(net)
            .learn_rate(0.1)
            .train_dataloader(Box::new(dl))
    }

    #[test]
    fn test_fixed_iteration_count() {
        let mut orc = orchestra();
        let errs = orc.train_for_n_times(50).unwrap();

        assert_eq!(errs.len(), 50);
        assert!(errs[49] < errs[0]);
    }

    #[test]
    fn test_callback_stop() {
        let mut orc = orchestra();
        let seen = Rc::new(Cell::new(0));
        let seen_cb = seen.clone();

        orc.add_callback(Box::new(move |iter, _err| {
            seen_cb.set(seen_cb.get() + 1);
            if iter == 9 {
                CallbackReturnAction::Stop
            } else {
                CallbackReturnAction::None
            }
        }));

        let errs = orc.train_for_n_times(100).unwrap();
        assert_eq!(errs.len(), 10);
        assert_eq!(seen.get(), 10);
    }

    #[test]
    fn test_requires_dataset_and_rate() {
        let net = Network::new(&mut StdRng::seed_from_u64(3), &[2, 1]).unwrap();
        let mut orc = Orchestra::new(net);
        assert!(matches!(orc.train_for_n_times(1), Err(NetError::InvalidCfg(_))));

        let mut orc = orchestra().learn_rate(0.0);
        assert!(orc.train_for_n_times(1).is_err());
    }

    #[test]
    fn test_setters_before_training() {
        let net = Network::new(&mut StdRng::seed_from_u64(3), &[2, 1]).unwrap();
        let mut orc = Orchestra::new(net);

        let dl = SimpleDataLoader::new(vec![LabeledEntry::new(vec![1.0, 0.5], vec![0.8])]).unwrap();
        orc.set_train_dataset(Box::new(dl));
        orc.set_learn_rate(0.2);

        let lw = orc.network_mut().weighting_mut(0).unwrap();
        lw.set_weights(array![[0.0], [0.0]]).unwrap();
        lw.set_bias(array![0.0]).unwrap();

        let errs = orc.train_for_n_times(1).unwrap();
        assert_abs_diff_eq!(errs[0], 0.045, epsilon = 1e-12);

        // error_in = (0.5 - 0.8) * sigmoid'(0) = -0.075
        let lw = orc.network().weighting(0).unwrap();
        assert_abs_diff_eq!(lw.weights()[[0, 0]], 0.015, epsilon = 1e-12);
        assert_abs_diff_eq!(lw.weights()[[1, 0]], 0.0075, epsilon = 1e-12);
        assert_abs_diff_eq!(lw.bias()[0], 0.015, epsilon = 1e-12);
    }

    #[test]
    fn test_mismatched_entry_fails() {
        let net = Network::new(&mut StdRng::seed_from_u64(3), &[2, 1]).unwrap();
        let dl = SimpleDataLoader::new(vec![LabeledEntry::new(vec![1.0], vec![0.8])]).unwrap();
        let mut orc = Orchestra::new(net).train_dataloader(Box::new(dl));

        assert!(matches!(
            orc.train_for_n_times(5),
            Err(NetError::DimensionMismatch { .. })
        ));
    }
}
