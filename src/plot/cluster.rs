//! Column ordering by hierarchical clustering.
//!
//! Agglomerative clustering with average linkage over Euclidean distances
//! between column vectors. Used only to reorder heatmap columns so similar
//! conditions sit next to each other; rows keep their table order.

/// Compute a column order for `matrix` (rows x columns).
///
/// Returns a permutation of `0..columns`: the concatenation order of the
/// final merged cluster. Degenerate inputs (no rows, zero or one column)
/// come back in identity order.
pub fn column_order(matrix: &[Vec<f64>]) -> Vec<usize> {
    let n = match matrix.first() {
        Some(row) => row.len(),
        None => return Vec::new(),
    };
    if n <= 1 {
        return (0..n).collect();
    }

    // Pairwise Euclidean distances between column vectors.
    let mut distances = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let dist: f64 = matrix
                .iter()
                .map(|row| (row[i] - row[j]) * (row[i] - row[j]))
                .sum::<f64>()
                .sqrt();
            distances[i][j] = dist;
            distances[j][i] = dist;
        }
    }

    // Start with each column as its own cluster and merge the closest
    // pair (average linkage) until one cluster remains.
    let mut clusters: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();

    while clusters.len() > 1 {
        let mut min_dist = f64::INFINITY;
        let mut merge_i = 0;
        let mut merge_j = 1;

        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let mut total = 0.0;
                let mut count = 0usize;
                for &a in &clusters[i] {
                    for &b in &clusters[j] {
                        total += distances[a][b];
                        count += 1;
                    }
                }
                let avg = if count > 0 {
                    total / count as f64
                } else {
                    f64::INFINITY
                };

                if avg < min_dist {
                    min_dist = avg;
                    merge_i = i;
                    merge_j = j;
                }
            }
        }

        let merged_tail = clusters.remove(merge_j);
        clusters[merge_i].extend(merged_tail);
    }

    clusters.pop().unwrap_or_default()
}

/// Apply a column permutation to the matrix and its labels together.
pub fn permute_columns(
    matrix: &[Vec<f64>],
    labels: &[String],
    order: &[usize],
) -> (Vec<Vec<f64>>, Vec<String>) {
    let permuted_matrix = matrix
        .iter()
        .map(|row| order.iter().map(|&j| row[j]).collect())
        .collect();
    let permuted_labels = order.iter().map(|&j| labels[j].clone()).collect();
    (permuted_matrix, permuted_labels)
}
