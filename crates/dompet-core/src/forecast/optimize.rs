//! Derivative-free minimisation (Nelder-Mead simplex)

/// Stopping rules for [`nelder_mead`]
#[derive(Debug, Clone, Copy)]
pub struct SimplexOptions {
    pub max_iterations: usize,
    /// Relative spread of objective values across the simplex
    pub tolerance: f64,
    /// Initial offset along each axis
    pub step: f64,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            tolerance: 1e-10,
            step: 0.25,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Minimum {
    pub point: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
}

/// Minimise `f` starting from `x0`
///
/// Deterministic: same inputs always give the same minimum.
pub fn nelder_mead<F>(f: F, x0: &[f64], options: SimplexOptions) -> Minimum
where
    F: Fn(&[f64]) -> f64,
{
    let n = x0.len();
    if n == 0 {
        return Minimum {
            point: vec![],
            value: f(x0),
            iterations: 0,
        };
    }

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(x0.to_vec());
    for i in 0..n {
        let mut vertex = x0.to_vec();
        vertex[i] += options.step;
        simplex.push(vertex);
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| f(v)).collect();

    let mut iterations = 0;
    while iterations < options.max_iterations {
        iterations += 1;

        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        simplex = order.iter().map(|&i| simplex[i].clone()).collect();
        values = order.iter().map(|&i| values[i]).collect();

        let best = values[0];
        let worst = values[n];
        let spread = options.tolerance * (best.abs() + worst.abs()) + f64::MIN_POSITIVE;
        if (worst - best).abs() <= spread {
            break;
        }

        let centroid: Vec<f64> = (0..n)
            .map(|j| simplex[..n].iter().map(|v| v[j]).sum::<f64>() / n as f64)
            .collect();
        let toward = |coef: f64| -> Vec<f64> {
            centroid
                .iter()
                .zip(&simplex[n])
                .map(|(c, w)| c + coef * (w - c))
                .collect()
        };

        let reflected = toward(-1.0);
        let f_reflected = f(&reflected);

        if f_reflected < values[0] {
            let expanded = toward(-2.0);
            let f_expanded = f(&expanded);
            if f_expanded < f_reflected {
                simplex[n] = expanded;
                values[n] = f_expanded;
            } else {
                simplex[n] = reflected;
                values[n] = f_reflected;
            }
        } else if f_reflected < values[n - 1] {
            simplex[n] = reflected;
            values[n] = f_reflected;
        } else {
            let (contracted, f_contracted) = if f_reflected < values[n] {
                let c = toward(-0.5);
                let fc = f(&c);
                (c, fc)
            } else {
                let c = toward(0.5);
                let fc = f(&c);
                (c, fc)
            };

            if f_contracted < values[n].min(f_reflected) {
                simplex[n] = contracted;
                values[n] = f_contracted;
            } else {
                let anchor = simplex[0].clone();
                for i in 1..=n {
                    simplex[i] = anchor
                        .iter()
                        .zip(&simplex[i])
                        .map(|(a, x)| a + 0.5 * (x - a))
                        .collect();
                    values[i] = f(&simplex[i]);
                }
            }
        }
    }

    let best = (0..=n)
        .min_by(|&a, &b| values[a].total_cmp(&values[b]))
        .unwrap_or(0);

    Minimum {
        point: simplex[best].clone(),
        value: values[best],
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_bowl() {
        let f = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2) + 3.0;
        let min = nelder_mead(f, &[0.0, 0.0], SimplexOptions::default());

        assert!((min.point[0] - 1.0).abs() < 1e-3);
        assert!((min.point[1] + 2.0).abs() < 1e-3);
        assert!((min.value - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_rosenbrock() {
        let f = |x: &[f64]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2);
        let options = SimplexOptions {
            max_iterations: 5000,
            tolerance: 1e-14,
            step: 0.5,
        };
        let min = nelder_mead(f, &[-1.2, 1.0], options);

        assert!((min.point[0] - 1.0).abs() < 1e-2);
        assert!((min.point[1] - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_flat_objective_stops_immediately() {
        let min = nelder_mead(|_: &[f64]| 0.0, &[0.0, 0.0, 0.0], SimplexOptions::default());
        assert_eq!(min.iterations, 1);
        assert_eq!(min.value, 0.0);
    }
}
