/// 去除重複值後依自然全序遞增排序。輸入的純函數,不會失敗。
pub fn dedupe_and_sort(mut numbers: Vec<f64>) -> Vec<f64> {
    numbers.sort_by(f64::total_cmp);
    numbers.dedup();
    numbers
}
