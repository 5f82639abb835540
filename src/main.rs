// Copyright (c) 2022 Bastiaan Marinus van de Weerd


macro_rules! days { ( $( $day:literal ),+ ) => { paste::paste! {
	$( mod [<day $day>]; )+

	fn main() {
		let only_day = std::env::args().nth(1).map(|arg| arg.parse::<u8>()
			.unwrap_or_else(|e| panic!("Invalid day {arg:?} ({e})")));
		if let Some(day) = only_day.filter(|d| ![$( $day ),+].contains(d)) {
			eprintln!("No solutions for day {day}");
			std::process::exit(1);
		}
		$( if only_day.map_or(true, |d| d == $day) {
			println!("Day {}, part 1: {}", $day, [<day $day>]::part1());
			println!("Day {}, part 2: {}", $day, [<day $day>]::part2());
		} )+
	}
} } }

days!(12);
