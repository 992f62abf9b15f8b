// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_output::SearchOutput;
use std::io::{self, Write};

/// 把结果写成一行 JSON 并刷新
pub fn write_output<W: Write>(writer: &mut W, output: &SearchOutput) -> io::Result<()> {
    let json = output.to_json()?;
    writeln!(writer, "{}", json)?;
    writer.flush()
}

/// 输出到标准输出
pub fn emit(output: &SearchOutput) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_output(&mut handle, output)
}
