/*!

This is the long-form manual for `survey_tally` and `exitsurvey`.

## Input format

The input is a spreadsheet (xlsx, xls, ods). Only the first worksheet is read.
It may start with a preamble describing the course, followed by the survey itself:

```text
Subject Name: Environmental Studies
Subject Code: 23EVS127
Branch: CSE           Year: 2023-24

Question  | USN        | NAME  | Q1        | Q2        | ...
Student 1 | 1BG23CS001 | Alice | Excellent | Good      | ...
Student 2 | 1BG23CS002 | Bob   | Poor      | Very Good | ...
```

### Preamble

Every text cell is searched for the labels `Subject Name`, `Subject Code`, `Branch` and
`Year`, in this order. A cell provides at most one field, the first label it contains.
The value of the field is the text after the last colon of the cell, without the
surrounding spaces.

If none of the labels is found, the file is assumed to have no preamble: the first row
is the header of the survey and all the course fields are reported as `Unknown`.

### Survey header

With a preamble, the header of the survey is the first row whose first cell contains
the word `Question`. If there is no such row, the header is taken at row 8 (index 7).
This is a heuristic: surveys exported without the marker should be edited to include
it.

### Columns

The columns `NAME` and `USN` are removed if they exist. The first remaining column is
kept as the respondent column and is not tallied. All the other columns are questions,
renamed `{Subject Code}.1`, `{Subject Code}.2`, ... from left to right.

## Counting rules

- The rating scale is `Excellent`, `Very Good`, `Good`, `Satisfactory`, `Poor`. The
  match is exact and case-sensitive.
- Answers outside of the scale (including blank cells and numbers) are not counted in
  any category, but the respondent still counts in the total.
- The total is the number of non-blank rows of the survey, shared by all questions.
- `E+V+G` is the sum of `Excellent`, `Very Good` and `Good`.
- `%` is `100 * E+V+G / total`, rounded to 2 decimals, and 0 for an empty survey.

## Report

The report is a Word document named `{Subject Code}_analysis.docx` in the output
directory. A JSON version of the same numbers can be printed with `--out stdout`.

*/
