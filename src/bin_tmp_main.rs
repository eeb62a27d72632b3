fn main() {
    let v: f64 = 30.999999999999982;
    let s = serde_json::to_string(&v).unwrap();
    println!("{}", s);
    let v2: f64 = serde_json::from_str(&s).unwrap();
    println!("{} {} eq={}", v, v2, v==v2);
}
